//! `WmDate`: a calendar date without time of day, or an invalid date.

use std::cell::RefCell;

use crate::runner::bridge::class::{ExposedClass, HostClass, HostObject};
use crate::runner::bridge::enums::{create_enum, ExposedEnum};
use crate::runner::bridge::invoker::{CallContext, Exposed, Instance};
use crate::runner::bridge::member::MemberTable;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::type_conversion::{get_type, to_number};
use crate::runner::ds::symbol::SYMBOL_TO_PRIMITIVE;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::calendar;
use crate::runner::std_lib::format::{apply_pattern, Fields};

pub(crate) enum Hint {
    Default,
    String,
    Number,
}

/// Reads the argument of a `[Symbol.toPrimitive]` call.
pub(crate) fn read_hint(hint: &JsValue) -> Result<Hint, JErrorType> {
    let got = match hint {
        JsValue::String(s) => match s.as_str() {
            "default" => return Ok(Hint::Default),
            "string" => return Ok(Hint::String),
            "number" => return Ok(Hint::Number),
            other => format!("string {}", other),
        },
        other => get_type(other).to_string(),
    };
    Err(JErrorType::TypeError(format!(
        "expected \"string\", \"number\", or \"default\", got {}",
        got
    )))
}

/// Day numbers outside years 1..=9999 make the date invalid.
fn checked(days: Option<i64>) -> Option<i64> {
    days.filter(|d| calendar::in_supported_range(*d))
}

/// Any offset past this bound leaves years 1..=9999, so it is treated as
/// invalid before any day arithmetic runs.
const MAX_OFFSET: f64 = 1e12;

fn whole(n: f64) -> Option<i64> {
    if n.is_finite() && n.abs() <= MAX_OFFSET {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmDate {
    days: Option<i64>,
}
impl HostObject for WmDate {}

impl WmDate {
    pub const INVALID: &'static str = "Invalid WmDate";

    pub fn from_ymd(year: i64, month: u32, day: u32) -> Self {
        WmDate {
            days: checked(Some(calendar::days_from_civil(year, month, day))),
        }
    }

    pub fn invalid() -> Self {
        WmDate { days: None }
    }

    /// Spreadsheet serial: days since 1899-12-30.
    pub fn from_serial(serial: f64) -> Self {
        WmDate {
            days: checked(
                whole(serial.floor()).and_then(|s| s.checked_add(calendar::SERIAL_EPOCH)),
            ),
        }
    }

    pub fn today() -> Self {
        WmDate {
            days: Some(calendar::today()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.days.is_some()
    }

    pub fn ymd(&self) -> Option<(i64, u32, u32)> {
        self.days.map(calendar::civil_from_days)
    }

    pub fn serial(&self) -> Option<i64> {
        self.days.map(|d| d - calendar::SERIAL_EPOCH)
    }

    /// January 1st of `year`, moved by the month and day offsets.
    fn from_parts(year: f64, month_offset: f64, day_offset: f64) -> Self {
        let days = match (whole(year), whole(month_offset), whole(day_offset)) {
            (Some(y), Some(m), Some(d)) if (calendar::MIN_YEAR..=calendar::MAX_YEAR).contains(&y) => {
                let start = calendar::days_from_civil(y, 1, 1);
                calendar::add_months(start, m).checked_add(d)
            }
            _ => None,
        };
        WmDate {
            days: checked(days),
        }
    }

    fn shifted(&self, amount: f64, shift: impl Fn(i64, i64) -> Option<i64>) -> Exposed<WmDate> {
        let days = match (self.days, whole(amount)) {
            (Some(days), Some(n)) => checked(shift(days, n)),
            _ => None,
        };
        Exposed(WmDate { days })
    }

    fn fields(&self) -> Option<Fields> {
        self.ymd().map(|(year, month, day)| Fields {
            year,
            month,
            day,
            ..Fields::default()
        })
    }

    fn formatted(&self, pattern: &str) -> String {
        match self.fields() {
            Some(fields) => apply_pattern(pattern, &fields),
            None => WmDate::INVALID.to_string(),
        }
    }

    fn component(&self, pick: impl Fn((i64, u32, u32)) -> i64) -> f64 {
        match self.ymd() {
            Some(ymd) => pick(ymd) as f64,
            None => f64::NAN,
        }
    }

    fn year(&self, _ctx: &CallContext<'_>) -> f64 {
        self.component(|(y, _, _)| y)
    }

    fn month(&self, _ctx: &CallContext<'_>) -> f64 {
        self.component(|(_, m, _)| m as i64)
    }

    fn day(&self, _ctx: &CallContext<'_>) -> f64 {
        self.component(|(_, _, d)| d as i64)
    }

    fn day_of_week(&self, _ctx: &CallContext<'_>) -> f64 {
        match self.days {
            Some(days) => calendar::weekday(days) as f64,
            None => f64::NAN,
        }
    }

    fn add_years(&self, _ctx: &CallContext<'_>, years: f64) -> Exposed<WmDate> {
        self.shifted(years, |days, n| {
            n.checked_mul(12).map(|months| calendar::add_months(days, months))
        })
    }

    fn add_months(&self, _ctx: &CallContext<'_>, months: f64) -> Exposed<WmDate> {
        self.shifted(months, |days, n| Some(calendar::add_months(days, n)))
    }

    fn add_days(&self, _ctx: &CallContext<'_>, days: f64) -> Exposed<WmDate> {
        self.shifted(days, |d, n| d.checked_add(n))
    }

    fn to_primitive(&self, ctx: &CallContext<'_>, hint: JsValue) -> Result<JsValue, JErrorType> {
        match read_hint(&hint)? {
            Hint::Default | Hint::String => Ok(JsValue::String(self.to_js_string(ctx))),
            Hint::Number => Ok(match self.serial() {
                Some(serial) => JsValue::integer(serial),
                None => JsValue::number(f64::NAN),
            }),
        }
    }

    fn to_json(&self, ctx: &CallContext<'_>) -> String {
        self.to_js_string(ctx)
    }

    fn to_locale_string(&self, ctx: &CallContext<'_>) -> String {
        self.formatted(&ctx.realm().formats().locale_date)
    }

    fn to_js_string(&self, ctx: &CallContext<'_>) -> String {
        self.formatted(&ctx.realm().formats().date)
    }

    fn js_equals(&self, ctx: &CallContext<'_>, other: JsValue) -> bool {
        if let (JsValue::Object(this), JsValue::Object(that)) = (ctx.this(), &other) {
            if std::rc::Rc::ptr_eq(this, that) {
                return true;
            }
        }
        match (self.days, Instance::<WmDate>::from_js(&other)) {
            (Some(days), Some(that)) => that.days == Some(days),
            _ => false,
        }
    }
}

impl HostClass for WmDate {
    fn declare(members: &mut MemberTable<Self>) {
        members.property("Year").getter(WmDate::year);
        members.property("Month").getter(WmDate::month);
        members.property("Day").getter(WmDate::day);
        members.property("DayOfWeek").getter(WmDate::day_of_week);
        members.method("AddYears", WmDate::add_years);
        members.method("AddMonths", WmDate::add_months);
        members.method("AddDays", WmDate::add_days);
        members
            .method("ToPrimitive", WmDate::to_primitive)
            .symbol(&SYMBOL_TO_PRIMITIVE);
        members.method("ToJSON", WmDate::to_json);
        members.method("ToLocaleString", WmDate::to_locale_string);
        members.method("ToJsString", WmDate::to_js_string).name("toString");
        members.method("JsEquals", WmDate::js_equals).name("equals");
    }
}

impl ExposedClass for WmDate {
    const NAME: &'static str = "WmDate";
    type Statics = WmDateStatics;

    fn construct(ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        let realm = ctx.realm();
        match args {
            [] => Ok(WmDate::today()),
            [serial] => Ok(WmDate::from_serial(to_number(realm, serial)?)),
            [year, month, rest @ ..] => {
                let year = to_number(realm, year)?;
                let month = to_number(realm, month)? - 1.0;
                let day = match rest.first() {
                    Some(day) => to_number(realm, day)? - 1.0,
                    None => 0.0,
                };
                if year.is_nan() || month.is_nan() || day.is_nan() {
                    Ok(WmDate::invalid())
                } else {
                    Ok(WmDate::from_parts(year, month, day))
                }
            }
        }
    }
}

pub struct DayOfWeek;
impl ExposedEnum for DayOfWeek {
    const NAME: &'static str = "DayOfWeek";

    fn variants() -> &'static [(&'static str, i32)] {
        &[
            ("Sunday", 0),
            ("Monday", 1),
            ("Tuesday", 2),
            ("Wednesday", 3),
            ("Thursday", 4),
            ("Friday", 5),
            ("Saturday", 6),
        ]
    }
}

/// Constructor-level members of `WmDate`.
#[derive(Default)]
pub struct WmDateStatics {
    day_of_week: RefCell<Option<JsObjectType>>,
}
impl HostObject for WmDateStatics {}

impl WmDateStatics {
    fn day_of_week(&self, ctx: &CallContext<'_>) -> JsObjectType {
        let mut cached = self.day_of_week.borrow_mut();
        cached
            .get_or_insert_with(|| create_enum::<DayOfWeek>(ctx.realm()))
            .clone()
    }
}

impl HostClass for WmDateStatics {
    fn declare(members: &mut MemberTable<Self>) {
        members
            .property("DayOfWeek")
            .getter(WmDateStatics::day_of_week)
            .name("DayOfWeek");
    }
}
