use std::borrow::Cow;

use image::Rgb;

/// Colour used for class ids the table has no entry for.
pub const FALLBACK_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassEntry {
    pub id: usize,
    pub key: &'static str,
    pub label: &'static str,
}

/// Fixed classId -> (key, label) mapping plus a parallel colour list.
///
/// Lookups never fail: a missing label falls back to the stringified class id and a
/// missing colour to [`FALLBACK_COLOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassTable {
    pub classes: &'static [ClassEntry],
    pub colors: &'static [&'static str],
}

/// NDL-DocL classical document layout classes.
pub const NDL_DOCL: ClassTable = ClassTable {
    classes: &[
        ClassEntry { id: 0, key: "1_overall", label: "全体" },
        ClassEntry { id: 1, key: "2_handwritten", label: "手書き" },
        ClassEntry { id: 2, key: "3_typography", label: "活字" },
        ClassEntry { id: 3, key: "4_illustration", label: "図版" },
        ClassEntry { id: 4, key: "5_stamp", label: "印判" },
    ],
    colors: &["#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6"],
};

impl Default for ClassTable {
    fn default() -> Self {
        NDL_DOCL
    }
}

impl ClassTable {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn entry(&self, class_id: usize) -> Option<&ClassEntry> {
        self.classes.get(class_id)
    }

    pub fn key(&self, class_id: usize) -> Option<&'static str> {
        self.entry(class_id).map(|c| c.key)
    }

    pub fn label(&self, class_id: usize) -> Cow<'static, str> {
        match self.entry(class_id) {
            Some(c) => Cow::Borrowed(c.label),
            None => Cow::Owned(class_id.to_string()),
        }
    }

    pub fn color(&self, class_id: usize) -> &'static str {
        self.colors.get(class_id).copied().unwrap_or(FALLBACK_COLOR)
    }
}

/// Parses `#rrggbb`. Anything else becomes white.
pub fn parse_hex_color(hex: &str) -> Rgb<u8> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Rgb([255, 255, 255]);
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(255);
    Rgb([channel(0), channel(2), channel(4)])
}
