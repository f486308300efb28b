use chrono::NaiveDate;
use fake::faker::lorem::en::Word;
use fake::Fake;
use finance_repo::expense_repo::NewExpense;
use finance_repo::income_repo::NewIncome;
use finance_repo::year_month::YearMonth;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

pub trait Generator<T> {
    fn gen(&mut self) -> T;
}

struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

struct FakeDescription;

impl Generator<String> for FakeDescription {
    fn gen(&mut self) -> String {
        Word().fake()
    }
}

/// Amounts in cents, negative values included.
struct FakeAmount;

impl Generator<Decimal> for FakeAmount {
    fn gen(&mut self) -> Decimal {
        let cents: i64 = rand::thread_rng().gen_range(-100_000..1_000_000);
        Decimal::new(cents, 2)
    }
}

struct FakeDate;

impl Generator<NaiveDate> for FakeDate {
    fn gen(&mut self) -> NaiveDate {
        let mut rng = rand::thread_rng();
        NaiveDate::from_ymd_opt(
            rng.gen_range(2000..2030),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )
        .unwrap()
    }
}

#[allow(dead_code)]
pub struct NewExpenseGenerator {
    desc_gen: Box<dyn Generator<String>>,
    amnt_gen: Box<dyn Generator<Decimal>>,
    date_gen: Box<dyn Generator<NaiveDate>>,
}

#[allow(dead_code)]
impl NewExpenseGenerator {
    pub fn with_descriptions(mut self, descriptions: Vec<&str>) -> NewExpenseGenerator {
        let descriptions = descriptions.into_iter().map(|s| s.to_string()).collect();
        self.desc_gen = Predefined::boxed(descriptions);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> NewExpenseGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> NewExpenseGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn generate(&mut self) -> NewExpense {
        NewExpense::new(self.desc_gen.gen(), self.amnt_gen.gen(), self.date_gen.gen())
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<NewExpense> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}

impl Default for NewExpenseGenerator {
    fn default() -> Self {
        NewExpenseGenerator {
            desc_gen: Box::new(FakeDescription),
            amnt_gen: Box::new(FakeAmount),
            date_gen: Box::new(FakeDate),
        }
    }
}

#[allow(dead_code)]
pub struct NewIncomeGenerator {
    amnt_gen: Box<dyn Generator<Decimal>>,
    month_gen: Box<dyn Generator<YearMonth>>,
}

#[allow(dead_code)]
impl NewIncomeGenerator {
    pub fn with_months(mut self, months: Vec<YearMonth>) -> NewIncomeGenerator {
        self.month_gen = Predefined::boxed(months);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> NewIncomeGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn generate(&mut self) -> NewIncome {
        NewIncome::for_month(self.amnt_gen.gen(), self.month_gen.gen())
    }
}

impl Default for NewIncomeGenerator {
    fn default() -> Self {
        let months = (1..=12)
            .map(|m| YearMonth::new(2024, m).unwrap())
            .collect();
        NewIncomeGenerator {
            amnt_gen: Box::new(FakeAmount),
            month_gen: RandomSample::boxed(months),
        }
    }
}
