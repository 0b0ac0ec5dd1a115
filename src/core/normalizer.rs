use crate::domain::model::IdentifierList;
use crate::utils::error::{Result, TrackerError};

pub const DEFAULT_MAX_IDS: usize = 20;

/// 把使用者輸入的文字切成追蹤號碼清單
///
/// 換行視為逗號，再以逗號切開、去掉前後空白並丟棄空字串。順序依照輸入，
/// 重複的號碼會保留。號碼本身不做格式檢查，交給外部服務判斷。
pub fn normalize(raw: &str, max_ids: usize) -> Result<IdentifierList> {
    let ids: Vec<String> = raw
        .replace('\n', ",")
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(TrackerError::validation(
            "Please enter at least one tracking ID",
        ));
    }

    if ids.len() > max_ids {
        tracing::debug!("Rejected batch of {} tracking IDs (max {})", ids.len(), max_ids);
        return Err(TrackerError::validation(format!(
            "Maximum {} tracking IDs allowed",
            max_ids
        )));
    }

    Ok(IdentifierList::from_normalized(ids))
}
