//! 絞り込みモジュール
//!
//! 施設名・施設種別・郡名による絞り込みと、入力補完候補の生成。
//! すべて純粋関数で、入力の順序を保つ。

use crate::types::ClinicRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 補完候補を出す最小入力文字数
pub const SUGGESTION_MIN_CHARS: usize = 2;
/// 補完候補の最大件数
pub const SUGGESTION_LIMIT: usize = 5;

/// 絞り込み条件（空文字は未指定扱い）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// 施設名の部分一致（大文字小文字を無視）
    pub name_pattern: Option<String>,
    /// 施設種別の完全一致（大文字小文字を区別）
    pub facility_type: Option<String>,
    /// 郡名の部分一致（大文字小文字を無視）
    pub district_pattern: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        active(&self.name_pattern).is_none()
            && active(&self.facility_type).is_none()
            && active(&self.district_pattern).is_none()
    }

    /// 1件が条件に合うか
    pub fn matches(&self, record: &ClinicRecord) -> bool {
        if let Some(pattern) = active(&self.name_pattern) {
            if !contains_ignore_case(&record.name, pattern) {
                return false;
            }
        }

        if let Some(facility_type) = active(&self.facility_type) {
            if record.facility_type.as_deref() != Some(facility_type) {
                return false;
            }
        }

        if let Some(pattern) = active(&self.district_pattern) {
            match record.district.as_deref() {
                Some(district) if contains_ignore_case(district, pattern) => {}
                _ => return false,
            }
        }

        true
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 条件で絞り込む（条件なしなら全件をそのまま返す）
pub fn filter_clinics(records: &[ClinicRecord], criteria: &FilterCriteria) -> Vec<ClinicRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// 施設名の補完候補
pub fn name_suggestions(records: &[ClinicRecord], input: &str) -> Vec<String> {
    suggest(records.iter().map(|r| r.name.as_str()), input)
}

/// 郡名の補完候補
pub fn district_suggestions(records: &[ClinicRecord], input: &str) -> Vec<String> {
    suggest(records.iter().filter_map(|r| r.district.as_deref()), input)
}

fn suggest<'a>(values: impl Iterator<Item = &'a str>, input: &str) -> Vec<String> {
    if input.chars().count() < SUGGESTION_MIN_CHARS {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && contains_ignore_case(v, input))
        .filter(|v| seen.insert(*v))
        .take(SUGGESTION_LIMIT)
        .map(str::to_string)
        .collect()
}

/// 施設種別のプルダウン選択肢（出現順・重複なし）
pub fn facility_type_options(records: &[ClinicRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|r| r.facility_type.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
