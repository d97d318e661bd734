use crate::domain::model::{PostCodeRule, Province};
use std::sync::Arc;

pub trait RuleLookup: Send + Sync {
    /// 依國家代碼 (兩位大寫字母) 取得規則
    fn lookup(&self, country_code: &str) -> Option<&PostCodeRule>;
}

pub trait ProvinceLookup: Send + Sync {
    fn lookup_province(&self, country_code: &str, query: &str) -> Option<Province>;
}

impl<T: RuleLookup + ?Sized> RuleLookup for &T {
    fn lookup(&self, country_code: &str) -> Option<&PostCodeRule> {
        (**self).lookup(country_code)
    }
}

impl<T: RuleLookup + ?Sized> RuleLookup for Arc<T> {
    fn lookup(&self, country_code: &str) -> Option<&PostCodeRule> {
        (**self).lookup(country_code)
    }
}
