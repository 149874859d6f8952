// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES_MALE: &[&str] = &[
    "James", "Robert", "Michael", "David", "Daniel", "Thomas", "Kevin", "Brian", "Arjun", "Wei",
    "Omar", "Luis", "Rahul", "Ivan", "Pedro", "Ahmed",
];

const FIRST_NAMES_FEMALE: &[&str] = &[
    "Mary", "Linda", "Susan", "Karen", "Nancy", "Lisa", "Sandra", "Emily", "Priya", "Mei",
    "Fatima", "Sofia", "Anita", "Elena", "Lucia", "Aisha",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Patel",
    "Chen", "Khan", "Lopez", "Singh", "Petrov", "Silva", "Hassan",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "testmail.com", "school-qa.net"];

const STREETS: &[&str] = &[
    "Maple Street", "Oak Avenue", "Cedar Lane", "Park Road", "Hill Drive", "Lake View",
    "Station Road", "Church Street",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Lakeside", "Fairview", "Greenville", "Ashford", "Milton",
    "Brookfield",
];

const JOBS: &[&str] = &[
    "Accountant", "Engineer", "Nurse", "Shopkeeper", "Driver", "Pharmacist", "Architect",
    "Electrician", "Chef", "Journalist",
];

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim",
    "veniam",
];

const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// 确定性伪造数据源
///
/// 所有取值都来自一个种子化的随机数发生器，相同的种子在相同的调用序列下
/// 产生相同的数值序列
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    /// 使用固定种子创建实例
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 使用操作系统熵源创建实例
    ///
    /// 适用于不要求可复现序列的临时运行
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// 随机名（不区分性别）
    pub fn first_name(&mut self) -> String {
        if self.rng.random_bool(0.5) {
            self.pick(FIRST_NAMES_MALE).to_string()
        } else {
            self.pick(FIRST_NAMES_FEMALE).to_string()
        }
    }

    /// 随机姓
    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    /// 随机男性全名
    pub fn male_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES_MALE), self.pick(LAST_NAMES))
    }

    /// 随机女性全名
    pub fn female_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES_FEMALE), self.pick(LAST_NAMES))
    }

    /// 语法合法的随机邮箱地址
    pub fn email(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        let n: u32 = self.rng.random_range(1..10000);
        let domain = self.pick(EMAIL_DOMAINS);
        format!("{}.{}{}@{}", first, last, n, domain)
    }

    /// 随机电话号码（不超过15个字符）
    pub fn phone(&mut self) -> String {
        let area: u32 = self.rng.random_range(200..1000);
        let exchange: u32 = self.rng.random_range(200..1000);
        let line: u32 = self.rng.random_range(0..10000);
        format!("+1{}{}{:04}", area, exchange, line)
    }

    /// 随机地址
    pub fn address(&mut self) -> String {
        let number: u32 = self.rng.random_range(1..500);
        format!("{} {}, {}", number, self.pick(STREETS), self.pick(CITIES))
    }

    /// 随机职业
    pub fn job(&mut self) -> String {
        self.pick(JOBS).to_string()
    }

    /// 不超过max_chars的随机文本
    pub fn text(&mut self, max_chars: usize) -> String {
        let mut out = String::new();
        loop {
            let word = self.pick(LOREM_WORDS);
            // +1 for the joining space
            let needed = word.len() + if out.is_empty() { 0 } else { 1 };
            if out.len() + needed > max_chars {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
        out
    }

    /// 过去days_back天以内的随机日期
    pub fn past_date(&mut self, days_back: i64) -> NaiveDate {
        let offset = self.rng.random_range(0..=days_back);
        Utc::now().date_naive() - ChronoDuration::days(offset)
    }

    /// 未来min_days到max_days之间的随机日期
    pub fn future_date(&mut self, min_days: i64, max_days: i64) -> NaiveDate {
        let offset = self.rng.random_range(min_days..=max_days);
        Utc::now().date_naive() + ChronoDuration::days(offset)
    }

    /// 指定年龄区间内的随机出生日期
    pub fn date_of_birth(&mut self, min_age: i64, max_age: i64) -> NaiveDate {
        let days = self.rng.random_range((min_age * 365)..=(max_age * 365));
        Utc::now().date_naive() - ChronoDuration::days(days)
    }

    /// 指定长度的随机密码（字母、数字和常用符号）
    pub fn password(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let idx = self.rng.random_range(0..PASSWORD_CHARS.len());
                PASSWORD_CHARS[idx] as char
            })
            .collect()
    }

    /// 闭区间内的随机整数
    pub fn number(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..=high)
    }

    /// 以给定概率返回true
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    /// 从切片中随机取一项
    pub fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or("")
    }

    /// 从切片中随机取count个互不相同的项
    pub fn pick_many(&mut self, items: &[&str], count: usize) -> Vec<String> {
        items
            .choose_multiple(&mut self.rng, count)
            .map(|s| s.to_string())
            .collect()
    }
}
