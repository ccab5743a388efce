//! 结果表行匹配服务
//!
//! 在页面的第 N 个表格中查找第一列等于考试编号的行

use crate::error::{LookupError, LookupResult};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, warn};

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("static selector is valid"))
}

fn table_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "table")
}

fn row_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "tr")
}

fn cell_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector(&SEL, "td")
}

/// 在结果表中查找考生所在行
///
/// # 参数
/// - `page`: 页面 HTML
/// - `table_index`: 第几个 `<table>`（从 0 开始，按文档顺序）
/// - `examination_number`: 考试编号，如 `s0101/0023`
///
/// # 返回
/// 返回匹配行各单元格的文本；没有匹配时返回 `None`。
/// 多行匹配时以文档顺序中的最后一行为准。
pub fn find_row(
    page: &str,
    table_index: usize,
    examination_number: &str,
) -> LookupResult<Option<Vec<String>>> {
    let document = Html::parse_document(page);
    let tables: Vec<ElementRef> = document.select(table_selector()).collect();

    let table = tables.get(table_index).ok_or_else(|| {
        warn!(
            "页面只有 {} 个表格，找不到第 {} 个",
            tables.len(),
            table_index
        );
        LookupError::PageStructure {
            table_index,
            tables_found: tables.len(),
        }
    })?;

    let target = examination_number.to_lowercase();
    let mut matched = None;
    let mut match_count = 0usize;

    // 不提前退出：与线上观察到的行为一致，重复行取最后一行
    for row in table.select(row_selector()) {
        let cells = row_cells(row);
        let is_match = cells
            .first()
            .is_some_and(|first| first.to_lowercase() == target);

        if is_match {
            match_count += 1;
            matched = Some(cells);
        }
    }

    if match_count > 1 {
        warn!("考试编号 {} 匹配到 {} 行，取最后一行", target, match_count);
    }
    debug!("表格 #{} 匹配结果: {}", table_index, matched.is_some());

    Ok(matched)
}

/// 提取一行中所有 `<td>` 的文本
fn row_cells(row: ElementRef) -> Vec<String> {
    row.select(cell_selector())
        .map(|td| normalize_ws(&td.text().collect::<String>()))
        .collect()
}

/// 合并连续空白并去掉首尾空白
fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
