//! Date/time patterns.
//!
//! Recognised tokens: `yyyy`, `MM`, `dd`, `HH` (24-hour), `hh` (12-hour),
//! `mm` and `tt` (AM/PM). Everything else is copied as is.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fields {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hours: u32,
    pub minutes: u32,
}

const TOKENS: [&str; 7] = ["yyyy", "MM", "dd", "HH", "hh", "mm", "tt"];

pub fn apply_pattern(pattern: &str, fields: &Fields) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for token in TOKENS.iter() {
            if let Some(after) = rest.strip_prefix(*token) {
                out.push_str(&render(token, fields));
                rest = after;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

fn render(token: &str, fields: &Fields) -> String {
    match token {
        "yyyy" => format!("{:04}", fields.year),
        "MM" => format!("{:02}", fields.month),
        "dd" => format!("{:02}", fields.day),
        "HH" => format!("{:02}", fields.hours),
        "hh" => {
            let h = fields.hours % 12;
            format!("{:02}", if h == 0 { 12 } else { h })
        }
        "mm" => format!("{:02}", fields.minutes),
        _ => {
            if fields.hours < 12 {
                "AM".to_string()
            } else {
                "PM".to_string()
            }
        }
    }
}
