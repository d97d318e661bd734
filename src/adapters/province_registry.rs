use crate::config::toml_config::ProvinceTable;
use crate::core::extractor::fold_upper;
use crate::domain::model::Province;
use crate::domain::ports::ProvinceLookup;
use crate::utils::error::{PostCodeError, Result};
use crate::utils::validation::Validate;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static BUILTIN_PROVINCES: &str = include_str!("../../data/provinces.toml");

static BUILTIN: LazyLock<ProvinceRegistry> = LazyLock::new(|| {
    ProvinceRegistry::from_toml_str(BUILTIN_PROVINCES).expect("built-in province table is valid")
});

/// 比對用的鍵：移除所有空白後轉大寫
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_upper)
        .collect()
}

/// 單一國家的州/省清單與比對索引
#[derive(Debug)]
pub struct ProvinceIndex {
    provinces: Vec<Province>,
    by_key: HashMap<String, usize>,
}

impl ProvinceIndex {
    fn build(provinces: Vec<Province>) -> Self {
        let mut by_key = HashMap::new();
        for (index, province) in provinces.iter().enumerate() {
            for candidate in [&province.code, &province.name, &province.cn_name] {
                let key = normalize_key(candidate);
                if key.is_empty() {
                    continue;
                }
                // 先出現的記錄優先
                by_key.entry(key).or_insert(index);
            }
        }
        Self { provinces, by_key }
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn find(&self, query: &str) -> Option<&Province> {
        let key = normalize_key(query);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).map(|&index| &self.provinces[index])
    }
}

/// 州/省資料查詢，索引在第一次查詢某國家時建立並快取
pub struct ProvinceRegistry {
    table: ProvinceTable,
    cache: DashMap<String, Arc<ProvinceIndex>>,
}

impl ProvinceRegistry {
    pub fn new(table: ProvinceTable) -> Self {
        let countries = table
            .countries
            .into_iter()
            .map(|(country_code, provinces)| (country_code.to_ascii_uppercase(), provinces))
            .collect();

        Self {
            table: ProvinceTable { countries },
            cache: DashMap::new(),
        }
    }

    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table = ProvinceTable::from_toml_str(content)?;
        table.validate()?;
        tracing::info!("Loaded province data for {} countries", table.countries.len());
        Ok(Self::new(table))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn index(&self, country_code: &str) -> Option<Arc<ProvinceIndex>> {
        let country_code = country_code.trim().to_ascii_uppercase();
        if let Some(index) = self.cache.get(&country_code) {
            return Some(Arc::clone(index.value()));
        }

        let provinces = self.table.countries.get(&country_code)?;
        let index = self.cache.entry(country_code).or_insert_with(|| {
            tracing::debug!("Building province index ({} entries)", provinces.len());
            Arc::new(ProvinceIndex::build(provinces.clone()))
        });
        Some(Arc::clone(index.value()))
    }

    /// 國家的州/省清單
    pub fn provinces(&self, country_code: &str) -> Result<Arc<ProvinceIndex>> {
        self.index(country_code).ok_or_else(|| PostCodeError::NoProvinceData {
            country_code: country_code.trim().to_ascii_uppercase(),
        })
    }

    pub fn lookup(&self, country_code: &str, query: &str) -> Option<Province> {
        self.index(country_code)?.find(query).cloned()
    }

    pub fn check_province(&self, country_code: &str, query: &str) -> Result<Province> {
        let index = self.provinces(country_code)?;
        index.find(query).cloned().ok_or_else(|| PostCodeError::ProvinceNotFound {
            country_code: country_code.trim().to_ascii_uppercase(),
            query: query.to_string(),
        })
    }

    pub fn country_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.table.countries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl ProvinceLookup for ProvinceRegistry {
    fn lookup_province(&self, country_code: &str, query: &str) -> Option<Province> {
        self.lookup(country_code, query)
    }
}
