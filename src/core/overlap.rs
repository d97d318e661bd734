use crate::core::containment::{validate_range, RangeBounds};
use crate::domain::model::{PostCodeRule, PostalRange};
use crate::utils::error::{PostCodeError, Result};

/// 檢查範圍清單中沒有兩兩重疊的範圍，遇到第一個錯誤即回傳。
///
/// 每個範圍 i 都會與其他所有範圍 j 比對 (O(n²))，
/// 比對前兩者都必須是合法範圍。
/// - 數字規則：i 的起點或終點落在 j 的 [start, end] 內即視為重疊。
///   因為 (i, j) 與 (j, i) 都會檢查，這已涵蓋完全包含的情況。
/// - 文字規則：只有四個端點字串其中一組完全相同才視為重疊，
///   不判斷一般的區間包含 (例如 [AAA-ZZZ] 與 [BBB-CCC] 不會被視為重疊)。
pub fn check_no_overlap(rule: &PostCodeRule, ranges: &[PostalRange]) -> Result<()> {
    for (i, current) in ranges.iter().enumerate() {
        let current_bounds = checked_bounds(rule, current)?;

        for (j, other) in ranges.iter().enumerate() {
            if i == j {
                continue;
            }

            let other_bounds = checked_bounds(rule, other)?;
            if overlaps(current, &current_bounds, other, &other_bounds) {
                tracing::debug!("Overlap found between {} and {}", current, other);
                return Err(PostCodeError::OverlapDetected {
                    first: current.clone(),
                    second: other.clone(),
                });
            }
        }
    }

    Ok(())
}

fn checked_bounds(rule: &PostCodeRule, range: &PostalRange) -> Result<RangeBounds> {
    validate_range(rule, range, true).map_err(|source| PostCodeError::InvalidRange {
        range: range.clone(),
        source: Box::new(source),
    })
}

fn overlaps(
    current: &PostalRange,
    current_bounds: &RangeBounds,
    other: &PostalRange,
    other_bounds: &RangeBounds,
) -> bool {
    match current_bounds {
        RangeBounds::Numeric { start, end } => {
            other_bounds.contains_number(*start) || other_bounds.contains_number(*end)
        }
        RangeBounds::Text { .. } => {
            current.start == other.start
                || current.start == other.end
                || current.end == other.start
                || current.end == other.end
        }
    }
}
