//! Pure renderers mapping a record-shaped value to a fixed-size document.
//!
//! Both renderers share the same input contract: a fully populated
//! [`RequestRecord`] (callers supply placeholder defaults, never empty
//! fields) and a scale factor. The output is a fixed-dimension plain-text
//! document; the label is a small sticker-sized box, the form an
//! A4-proportioned page. Neither scrolls: content that does not fit is
//! truncated.

mod form;
mod label;

pub use form::render_form;
pub use label::render_label;
use serde::{Deserialize, Serialize};

use crate::domain::RequestRecord;

/// Which document the renderers produce.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Small adhesive sticker (350x200px paper).
    #[default]
    Label,
    /// Full A4 request form.
    Form,
}

impl PrintMode {
    /// Renders `record` through this mode's renderer.
    #[must_use]
    pub fn render(self, record: &RequestRecord, scale: f32) -> String {
        match self {
            Self::Label => render_label(record, scale),
            Self::Form => render_form(record, scale),
        }
    }

    /// Paper description shown in prompts and preview chrome.
    #[must_use]
    pub const fn paper(self) -> &'static str {
        match self {
            Self::Label => "350x200px sticker",
            Self::Form => "A4",
        }
    }
}

/// Scale clamp bounds shared with the on-screen zoom controls.
const MIN_SCALE: f32 = 0.5;
const MAX_SCALE: f32 = 2.0;

pub(crate) fn scaled_width(base: usize, scale: f32) -> usize {
    let scale = if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    };
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let width = (base as f32 * scale).round() as usize;
    width.max(20)
}

/// Truncates or pads `text` to exactly `width` columns.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Lays `left` and `right` out on one line of exactly `width` columns,
/// truncating `left` first when space runs out.
pub(crate) fn spread(left: &str, right: &str, width: usize) -> String {
    let right: String = right.chars().take(width).collect();
    let right_len = right.chars().count();
    let left_room = width.saturating_sub(right_len + 1);
    let left: String = left.chars().take(left_room).collect();
    let pad = width - left.chars().count() - right_len;
    format!("{left}{}{right}", " ".repeat(pad))
}
