const PAGE_TEMPLATE: &str = include_str!("../../assets/index.html");

/// 產生追蹤頁面，把號碼上限寫進說明文字
pub fn render_page(max_ids: usize) -> String {
    PAGE_TEMPLATE.replace("{{MAX_IDS}}", &max_ids.to_string())
}
