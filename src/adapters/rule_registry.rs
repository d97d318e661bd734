use crate::config::toml_config::RuleTable;
use crate::domain::model::PostCodeRule;
use crate::domain::ports::RuleLookup;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static BUILTIN_RULES: &str = include_str!("../../data/postcode_rules.toml");

static BUILTIN: LazyLock<RuleRegistry> = LazyLock::new(|| {
    RuleRegistry::from_toml_str(BUILTIN_RULES).expect("built-in postcode rule table is valid")
});

/// 國家代碼 -> 郵遞區號規則
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, PostCodeRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 內建規則表，整個程序只解析一次
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_rules(rules: Vec<PostCodeRule>) -> Self {
        let mut registry = Self::new();
        for rule in rules {
            registry.insert(rule);
        }
        registry
    }

    /// 驗證後編譯規則表
    pub fn from_table(table: &RuleTable) -> Result<Self> {
        table.validate()?;
        let registry = Self::from_rules(table.compile()?);
        tracing::info!("Loaded {} postcode rules", registry.len());
        Ok(registry)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_table(&RuleTable::from_toml_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading postcode rules from {}", path.as_ref().display());
        Self::from_table(&RuleTable::from_file(path)?)
    }

    /// 同一國家代碼重複加入時，後者覆蓋前者
    pub fn insert(&mut self, rule: PostCodeRule) -> Option<PostCodeRule> {
        self.rules.insert(rule.country_code.clone(), rule)
    }

    pub fn get(&self, country_code: &str) -> Option<&PostCodeRule> {
        self.rules
            .get(country_code)
            .or_else(|| self.rules.get(&country_code.to_ascii_uppercase()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostCodeRule> {
        self.rules.values()
    }

    pub fn country_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl RuleLookup for RuleRegistry {
    fn lookup(&self, country_code: &str) -> Option<&PostCodeRule> {
        self.get(country_code)
    }
}
