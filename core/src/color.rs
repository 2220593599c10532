//! Color format registry
//!
//! A color can be bound in four shapes: a CSS-ish string, a packed `0xRRGGBB`
//! integer, a `[r, g, b]` array or an `{r, g, b}` object. The format is
//! detected once from the initial value and every edit goes through a
//! canonical `#rrggbb` string.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

static HEX6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(#|0x)?([a-f0-9]{6})").expect("valid regex"));
static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").expect("valid regex")
});
static HEX3: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?([a-f0-9])([a-f0-9])([a-f0-9])$").expect("valid regex")
});

/// How a bound color value is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// `"#7a26ab"`, `"7a26ab"`, `"0x7a26ab"`, `"#7ab"` or `"rgb(122, 38, 171)"`
    String,
    /// `0x7a26ab`
    Integer,
    /// `[r, g, b]` with channels in `0..=rgb_scale`
    Array,
    /// `{ r, g, b }` with channels in `0..=rgb_scale`
    Object,
}

impl ColorFormat {
    /// Detection order: primitives first, then object-shaped formats
    pub const PRIORITY: [ColorFormat; 4] = [
        ColorFormat::String,
        ColorFormat::Integer,
        ColorFormat::Array,
        ColorFormat::Object,
    ];

    /// Classify a value; the first matching format wins
    pub fn detect(value: &Value) -> Option<ColorFormat> {
        Self::PRIORITY.into_iter().find(|format| format.matches(value))
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ColorFormat::String => matches!(value, Value::String(_)),
            ColorFormat::Integer => matches!(value, Value::Number(_)),
            ColorFormat::Array => matches!(value, Value::Array(_)),
            ColorFormat::Object => matches!(value, Value::Object(_)),
        }
    }

    /// Primitive formats are replaced on edit; the others are mutated in place
    pub fn is_primitive(&self) -> bool {
        matches!(self, ColorFormat::String | ColorFormat::Integer)
    }

    /// Render `value` as `#rrggbb`.
    ///
    /// Returns `None` when the value does not have this format's shape or a
    /// string value cannot be parsed.
    pub fn to_hex_string(&self, value: &Value, rgb_scale: f64) -> Option<String> {
        match (self, value) {
            (ColorFormat::String, Value::String(s)) => normalize_color_string(s),
            (ColorFormat::Integer, Value::Number(n)) => Some(int_to_hex(*n)),
            (ColorFormat::Array, Value::Array(list)) => {
                let channels = [list.get(0), list.get(1), list.get(2)];
                Some(channels_to_hex(&channels, rgb_scale))
            }
            (ColorFormat::Object, Value::Object(record)) => {
                let channels = [record.get("r"), record.get("g"), record.get("b")];
                Some(channels_to_hex(&channels, rgb_scale))
            }
            _ => None,
        }
    }

    /// Convert a hex string back into this format.
    ///
    /// Primitive formats return a new value. Array and object formats write
    /// the channels into `target` in place and return a handle to it, so any
    /// reference the application holds stays valid. Malformed input yields
    /// `None` and leaves `target` untouched.
    pub fn from_hex_string(&self, hex: &str, target: &Value, rgb_scale: f64) -> Option<Value> {
        let normalized = normalize_color_string(hex)?;
        match self {
            ColorFormat::String => Some(Value::String(normalized)),
            ColorFormat::Integer => Some(Value::Number(hex_to_int(&normalized)? as f64)),
            ColorFormat::Array => {
                let list = target.as_list()?;
                let [r, g, b] = unpack(hex_to_int(&normalized)?, rgb_scale);
                list.set(0, r);
                list.set(1, g);
                list.set(2, b);
                Some(target.clone())
            }
            ColorFormat::Object => {
                let record = target.as_record()?;
                let [r, g, b] = unpack(hex_to_int(&normalized)?, rgb_scale);
                record.set("r", r);
                record.set("g", g);
                record.set("b", b);
                Some(target.clone())
            }
        }
    }
}

/// Normalize loosely formatted color text to `#rrggbb`.
///
/// Accepts six hex digits with or without a `#`/`0x` prefix, `rgb(r, g, b)`
/// and `#rgb` shorthand. The case of hex digits is preserved. Anything else
/// returns `None`.
pub fn normalize_color_string(input: &str) -> Option<String> {
    if let Some(caps) = HEX6.captures(input) {
        return Some(format!("#{}", &caps[2]));
    }
    if let Some(caps) = RGB_FN.captures(input) {
        let mut out = String::from("#");
        for i in 1..=3 {
            let channel: u32 = caps[i].parse().ok()?;
            out.push_str(&format!("{:02x}", channel.min(255)));
        }
        return Some(out);
    }
    if let Some(caps) = HEX3.captures(input) {
        let mut out = String::from("#");
        for i in 1..=3 {
            out.push_str(&caps[i]);
            out.push_str(&caps[i]);
        }
        return Some(out);
    }
    None
}

fn hex_to_int(normalized: &str) -> Option<u32> {
    u32::from_str_radix(normalized.trim_start_matches('#'), 16).ok()
}

fn int_to_hex(n: f64) -> String {
    let packed = if n.is_finite() { (n as i64 & 0xFF_FFFF) as u32 } else { 0 };
    format!("#{:06x}", packed)
}

/// Scale channels from `0..=rgb_scale` to bytes and pack them
fn channels_to_hex(channels: &[Value; 3], rgb_scale: f64) -> String {
    let factor = 255.0 / rgb_scale;
    let mut packed: u32 = 0;
    for channel in channels {
        let v = channel.as_f64().unwrap_or(0.0) * factor;
        let byte = if v.is_finite() {
            v.round().clamp(0.0, 255.0) as u32
        } else {
            0
        };
        packed = (packed << 8) | byte;
    }
    int_to_hex(packed as f64)
}

/// Split a packed color into channels scaled to `0..=rgb_scale`
fn unpack(packed: u32, rgb_scale: f64) -> [f64; 3] {
    let channel = |shift: u32| ((packed >> shift) & 0xFF) as f64 * rgb_scale / 255.0;
    [channel(16), channel(8), channel(0)]
}
