//! 見出しバッジとフッターの集計カード

use crate::detail::Tone;
use crate::state::DashboardState;

/// 見出しのバッジ（ラベル, 値, 色）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBadge {
    pub label: &'static str,
    pub value: String,
    pub tone: &'static str,
}

/// 0件は "—" 表示
fn count_or_dash(count: usize) -> String {
    if count == 0 {
        "—".to_string()
    } else {
        count.to_string()
    }
}

pub fn header_badges(state: &DashboardState) -> Vec<HeaderBadge> {
    vec![
        HeaderBadge {
            label: "Total Clinics",
            value: count_or_dash(state.total()),
            tone: "primary",
        },
        HeaderBadge {
            label: "Visible",
            value: count_or_dash(state.visible_count()),
            tone: Tone::Success.as_str(),
        },
        HeaderBadge {
            label: "Zoom",
            value: format!("Z{}", state.zoom),
            tone: Tone::Info.as_str(),
        },
    ]
}

/// フッターの集計カード（固定値）
pub const SUMMARY_CARDS: &[(&str, &str)] = &[
    ("Total Clinics", "4,200"),
    ("Hospitals", "350"),
    ("Clinics w/ Clean Water", "2,900"),
    ("Supported by Donors", "3,100"),
];

/// フッターの著作権表記
pub fn footer_text(year: i32) -> String {
    format!("UNICEF Afghanistan © {year} | Contact: info@unicef.org")
}
