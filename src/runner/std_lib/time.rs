//! `WmTime`: a time of day with minute display precision, or an invalid time.
//!
//! Values are kept in milliseconds since midnight and always wrap within one
//! day.

use std::rc::Rc;

use crate::runner::bridge::class::{ExposedClass, HostClass, HostObject, NoStatics};
use crate::runner::bridge::invoker::{CallContext, Exposed, Instance};
use crate::runner::bridge::member::MemberTable;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::symbol::SYMBOL_TO_PRIMITIVE;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::calendar::{now_time_of_day, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use crate::runner::std_lib::date::{read_hint, Hint};
use crate::runner::std_lib::format::{apply_pattern, Fields};

fn wrap(ms: f64) -> Option<i64> {
    if ms.is_finite() {
        Some((ms as i64).rem_euclid(MS_PER_DAY))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmTime {
    ms: Option<i64>,
}
impl HostObject for WmTime {}

impl WmTime {
    pub const INVALID: &'static str = "Invalid WmTime";

    pub fn from_hm(hours: f64, minutes: f64) -> Self {
        WmTime {
            ms: wrap(hours * MS_PER_HOUR as f64 + minutes * MS_PER_MINUTE as f64),
        }
    }

    /// Fraction of a day, clamped to [0, 1].
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return WmTime::invalid();
        }
        WmTime {
            ms: wrap(fraction.max(0.0).min(1.0) * MS_PER_DAY as f64),
        }
    }

    pub fn invalid() -> Self {
        WmTime { ms: None }
    }

    pub fn now() -> Self {
        WmTime {
            ms: Some(now_time_of_day()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ms.is_some()
    }

    pub fn hm(&self) -> Option<(u32, u32)> {
        self.ms.map(|ms| {
            (
                (ms / MS_PER_HOUR) as u32,
                ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            )
        })
    }

    fn shifted(&self, amount: f64, unit: i64) -> Exposed<WmTime> {
        let ms = match self.ms {
            Some(ms) if !amount.is_nan() => wrap(ms as f64 + amount * unit as f64),
            _ => None,
        };
        Exposed(WmTime { ms })
    }

    fn formatted(&self, pattern: &str) -> String {
        match self.hm() {
            Some((hours, minutes)) => apply_pattern(
                pattern,
                &Fields {
                    hours,
                    minutes,
                    ..Fields::default()
                },
            ),
            None => WmTime::INVALID.to_string(),
        }
    }

    fn hours(&self, _ctx: &CallContext<'_>) -> f64 {
        self.hm().map(|(h, _)| h as f64).unwrap_or(f64::NAN)
    }

    fn minutes(&self, _ctx: &CallContext<'_>) -> f64 {
        self.hm().map(|(_, m)| m as f64).unwrap_or(f64::NAN)
    }

    fn add_hours(&self, _ctx: &CallContext<'_>, hours: f64) -> Exposed<WmTime> {
        self.shifted(hours, MS_PER_HOUR)
    }

    fn add_minutes(&self, _ctx: &CallContext<'_>, minutes: f64) -> Exposed<WmTime> {
        self.shifted(minutes, MS_PER_MINUTE)
    }

    fn to_primitive(&self, ctx: &CallContext<'_>, hint: JsValue) -> Result<JsValue, JErrorType> {
        match read_hint(&hint)? {
            Hint::Default | Hint::String => Ok(JsValue::String(self.to_js_string(ctx))),
            Hint::Number => Ok(JsValue::number(match self.ms {
                Some(ms) => ms as f64 / MS_PER_DAY as f64,
                None => f64::NAN,
            })),
        }
    }

    fn to_json(&self, ctx: &CallContext<'_>) -> String {
        self.to_js_string(ctx)
    }

    fn to_locale_string(&self, ctx: &CallContext<'_>) -> String {
        self.formatted(&ctx.realm().formats().locale_time)
    }

    fn to_js_string(&self, ctx: &CallContext<'_>) -> String {
        self.formatted(&ctx.realm().formats().time)
    }

    fn js_equals(&self, ctx: &CallContext<'_>, other: JsValue) -> bool {
        if let (JsValue::Object(this), JsValue::Object(that)) = (ctx.this(), &other) {
            if Rc::ptr_eq(this, that) {
                return true;
            }
        }
        match (self.ms, Instance::<WmTime>::from_js(&other)) {
            (Some(ms), Some(that)) => that.ms == Some(ms),
            _ => false,
        }
    }
}

impl HostClass for WmTime {
    fn declare(members: &mut MemberTable<Self>) {
        members.property("Hours").getter(WmTime::hours);
        members.property("Minutes").getter(WmTime::minutes);
        members
            .method("ToPrimitive", WmTime::to_primitive)
            .symbol(&SYMBOL_TO_PRIMITIVE);
        members.method("AddHours", WmTime::add_hours);
        members.method("AddMinutes", WmTime::add_minutes);
        members.method("ToJSON", WmTime::to_json);
        members.method("ToLocaleString", WmTime::to_locale_string);
        members.method("ToJsString", WmTime::to_js_string).name("toString");
        members.method("JsEquals", WmTime::js_equals).name("equals");
    }
}

impl ExposedClass for WmTime {
    const NAME: &'static str = "WmTime";
    type Statics = NoStatics;

    fn construct(ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        let realm = ctx.realm();
        match args {
            [] => Ok(WmTime::now()),
            [fraction] => Ok(WmTime::from_fraction(to_number(realm, fraction)?)),
            [hours, minutes, ..] => {
                let hours = to_number(realm, hours)?;
                let minutes = to_number(realm, minutes)?;
                if hours.is_nan() || minutes.is_nan() {
                    Ok(WmTime::invalid())
                } else {
                    Ok(WmTime::from_hm(hours, minutes))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_clamped() {
        assert_eq!(WmTime::from_fraction(0.5).hm(), Some((12, 0)));
        assert_eq!(WmTime::from_fraction(-3.0).hm(), Some((0, 0)));
        assert_eq!(WmTime::from_fraction(0.75).hm(), Some((18, 0)));
        assert!(!WmTime::from_fraction(f64::NAN).is_valid());
    }

    #[test]
    fn test_time_wraps_within_a_day() {
        assert_eq!(WmTime::from_hm(25.0, 30.0).hm(), Some((1, 30)));
        assert_eq!(WmTime::from_hm(0.0, -15.0).hm(), Some((23, 45)));
    }
}
