use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::Rng;

use modelmint_core::FieldDescriptor;

use crate::errors::GenerationError;
use crate::generators::{Generator, ProduceContext};
use crate::options::bounds_ordered;
use crate::value::{FieldValue, render_scalar};

const DEFAULT_INT_MIN: i64 = 0;
const DEFAULT_INT_MAX: i64 = 50_000;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 50_000.0;
const DEFAULT_TEXT_MIN: usize = 0;
const DEFAULT_TEXT_MAX: usize = 10;
const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_INT_DIGITS: u32 = 18;
const MAX_DECIMAL_SCALE: u32 = 9;

/// Options for [`ConstGenerator`].
#[derive(Debug, Clone)]
pub struct ConstOptions {
    /// Literal returned on every invocation.
    pub value: FieldValue,
}

impl Default for ConstOptions {
    fn default() -> Self {
        Self {
            value: FieldValue::Null,
        }
    }
}

/// Returns a configured literal, preferring descriptor choices.
///
/// The standard registry installs this (with a `Null` literal) as its
/// fallback for otherwise unmapped fields.
#[derive(Debug, Clone)]
pub struct ConstGenerator {
    value: FieldValue,
}

impl ConstGenerator {
    pub fn new(options: ConstOptions) -> Self {
        Self {
            value: options.value,
        }
    }
}

impl Default for ConstGenerator {
    fn default() -> Self {
        Self::new(ConstOptions::default())
    }
}

impl Generator for ConstGenerator {
    fn name(&self) -> &'static str {
        "const"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        Ok(Some(self.value.clone()))
    }
}

/// Adapts a closure as a generator, for one-off per-field overrides.
pub struct FnGenerator<F> {
    name: &'static str,
    func: F,
}

impl<F> FnGenerator<F>
where
    F: Fn(
            &mut ProduceContext<'_>,
            Option<&FieldDescriptor>,
        ) -> Result<Option<FieldValue>, GenerationError>
        + Send
        + Sync,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(
            &mut ProduceContext<'_>,
            Option<&FieldDescriptor>,
        ) -> Result<Option<FieldValue>, GenerationError>
        + Send
        + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        (self.func)(ctx, field)
    }
}

/// Output representation for generated integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericCast {
    #[default]
    Int,
    Float,
    Text,
}

impl NumericCast {
    fn apply(self, value: i64) -> FieldValue {
        match self {
            NumericCast::Int => FieldValue::Int(value),
            NumericCast::Float => FieldValue::Float(value as f64),
            NumericCast::Text => FieldValue::Text(value.to_string()),
        }
    }
}

/// Options for [`IntGenerator`] and [`SmartIntGenerator`].
#[derive(Debug, Clone)]
pub struct IntOptions {
    pub min: i64,
    pub max: i64,
    /// When non-zero, produce exactly this many decimal digits instead of
    /// drawing from `[min, max]`.
    pub length: u32,
    pub cast: NumericCast,
}

impl Default for IntOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_INT_MIN,
            max: DEFAULT_INT_MAX,
            length: 0,
            cast: NumericCast::Int,
        }
    }
}

fn validate_int_options(ctx: &'static str, options: &IntOptions) -> Result<(), GenerationError> {
    bounds_ordered(ctx, options.min, options.max)?;
    if options.length > MAX_INT_DIGITS {
        return Err(GenerationError::InvalidOptions(format!(
            "{ctx}: length must be <= {MAX_INT_DIGITS}"
        )));
    }
    Ok(())
}

fn random_int(ctx: &mut ProduceContext<'_>, min: i64, max: i64, length: u32) -> i64 {
    if length > 0 {
        let mut value: i64 = ctx.rng.random_range(1..=9);
        for _ in 1..length {
            value = value * 10 + ctx.rng.random_range(0..=9);
        }
        return value;
    }
    ctx.rng.random_range(min..=max)
}

/// Uniform integer in `[min, max]`, or one of exactly `length` decimal
/// digits, cast through the configured output representation.
#[derive(Debug, Clone)]
pub struct IntGenerator {
    min: i64,
    max: i64,
    length: u32,
    cast: NumericCast,
}

impl IntGenerator {
    pub fn new(options: IntOptions) -> Result<Self, GenerationError> {
        validate_int_options("int", &options)?;
        Ok(Self {
            min: options.min,
            max: options.max,
            length: options.length,
            cast: options.cast,
        })
    }
}

impl Default for IntGenerator {
    fn default() -> Self {
        let options = IntOptions::default();
        Self {
            min: options.min,
            max: options.max,
            length: options.length,
            cast: options.cast,
        }
    }
}

impl Generator for IntGenerator {
    fn name(&self) -> &'static str {
        "int"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        let value = random_int(ctx, self.min, self.max, self.length);
        Ok(Some(self.cast.apply(value)))
    }
}

/// Schema-aware integer: short-circuits to the descriptor default, adopts
/// descriptor bounds, then falls back to bounded generation.
#[derive(Debug, Clone)]
pub struct SmartIntGenerator {
    min: i64,
    max: i64,
    length: u32,
    cast: NumericCast,
}

impl SmartIntGenerator {
    pub fn new(options: IntOptions) -> Result<Self, GenerationError> {
        validate_int_options("smart_int", &options)?;
        Ok(Self {
            min: options.min,
            max: options.max,
            length: options.length,
            cast: options.cast,
        })
    }
}

impl Default for SmartIntGenerator {
    fn default() -> Self {
        let options = IntOptions::default();
        Self {
            min: options.min,
            max: options.max,
            length: options.length,
            cast: options.cast,
        }
    }
}

impl Generator for SmartIntGenerator {
    fn name(&self) -> &'static str {
        "smart_int"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(field) = field
            && let Some(default) = &field.default
        {
            return Ok(Some(FieldValue::from_json(default)));
        }
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        let (mut min, mut max) = (self.min, self.max);
        if let Some(field) = field {
            if let Some(value) = field.min_value {
                min = value as i64;
            }
            if let Some(value) = field.max_value {
                max = value as i64;
            }
            if min > max {
                return Err(GenerationError::InvalidSchema(format!(
                    "field '{}': min_value exceeds max_value",
                    field.name
                )));
            }
        }
        let value = random_int(ctx, min, max, self.length);
        Ok(Some(self.cast.apply(value)))
    }
}

/// Options for [`FloatGenerator`].
#[derive(Debug, Clone)]
pub struct FloatOptions {
    pub min: f64,
    pub max: f64,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_FLOAT_MIN,
            max: DEFAULT_FLOAT_MAX,
        }
    }
}

/// Uniform float in `[min, max]`.
#[derive(Debug, Clone)]
pub struct FloatGenerator {
    min: f64,
    max: f64,
}

impl FloatGenerator {
    pub fn new(options: FloatOptions) -> Result<Self, GenerationError> {
        bounds_ordered("float", options.min, options.max)?;
        Ok(Self {
            min: options.min,
            max: options.max,
        })
    }
}

impl Default for FloatGenerator {
    fn default() -> Self {
        let options = FloatOptions::default();
        Self {
            min: options.min,
            max: options.max,
        }
    }
}

impl Generator for FloatGenerator {
    fn name(&self) -> &'static str {
        "float"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        Ok(Some(FieldValue::Float(
            ctx.rng.random_range(self.min..=self.max),
        )))
    }
}

/// Options for [`DecimalGenerator`].
#[derive(Debug, Clone)]
pub struct DecimalOptions {
    pub min: f64,
    pub max: f64,
    /// Digits kept after the point.
    pub scale: u32,
}

impl Default for DecimalOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_FLOAT_MIN,
            max: DEFAULT_FLOAT_MAX,
            scale: 2,
        }
    }
}

/// Bounded float rounded to a fixed scale.
#[derive(Debug, Clone)]
pub struct DecimalGenerator {
    min: f64,
    max: f64,
    scale: u32,
}

impl DecimalGenerator {
    pub fn new(options: DecimalOptions) -> Result<Self, GenerationError> {
        bounds_ordered("decimal", options.min, options.max)?;
        if options.scale > MAX_DECIMAL_SCALE {
            return Err(GenerationError::InvalidOptions(format!(
                "decimal: scale must be <= {MAX_DECIMAL_SCALE}"
            )));
        }
        Ok(Self {
            min: options.min,
            max: options.max,
            scale: options.scale,
        })
    }
}

impl Default for DecimalGenerator {
    fn default() -> Self {
        let options = DecimalOptions::default();
        Self {
            min: options.min,
            max: options.max,
            scale: options.scale,
        }
    }
}

impl Generator for DecimalGenerator {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        let value: f64 = ctx.rng.random_range(self.min..=self.max);
        let factor = 10_f64.powi(self.scale as i32);
        Ok(Some(FieldValue::Float((value * factor).round() / factor)))
    }
}

/// Uniform true/false.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolGenerator;

impl Generator for BoolGenerator {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        Ok(Some(FieldValue::Bool(ctx.rng.random_bool(0.5))))
    }
}

/// Options for [`TextGenerator`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Minimum length, inclusive.
    pub min: usize,
    /// Maximum length, exclusive.
    pub max: usize,
    /// Characters drawn from.
    pub alphabet: String,
    /// Keep generated case instead of lower-casing.
    pub upper: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_TEXT_MIN,
            max: DEFAULT_TEXT_MAX,
            alphabet: DEFAULT_ALPHABET.to_string(),
            upper: false,
        }
    }
}

/// Random-length string from a configurable alphabet.
///
/// Descriptor `max_length` overrides the configured maximum.
#[derive(Debug, Clone)]
pub struct TextGenerator {
    min: usize,
    max: usize,
    alphabet: Vec<char>,
    upper: bool,
}

impl TextGenerator {
    pub fn new(options: TextOptions) -> Result<Self, GenerationError> {
        bounds_ordered("text", options.min, options.max)?;
        let alphabet: Vec<char> = options.alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(GenerationError::InvalidOptions(
                "text: alphabet must not be empty".to_string(),
            ));
        }
        Ok(Self {
            min: options.min,
            max: options.max,
            alphabet,
            upper: options.upper,
        })
    }
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self {
            min: DEFAULT_TEXT_MIN,
            max: DEFAULT_TEXT_MAX,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            upper: false,
        }
    }
}

impl Generator for TextGenerator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        let max = field
            .and_then(|field| field.max_length)
            .map(|len| len as usize)
            .unwrap_or(self.max);
        let min = self.min.min(max);
        let len = if max > min {
            ctx.rng.random_range(min..max)
        } else {
            min
        };
        let mut value = String::with_capacity(len);
        for _ in 0..len {
            let idx = ctx.rng.random_range(0..self.alphabet.len());
            value.push(self.alphabet[idx]);
        }
        if !self.upper {
            value = value.to_lowercase();
        }
        Ok(Some(FieldValue::Text(value)))
    }
}

/// Options for [`UrlGenerator`].
#[derive(Clone)]
pub struct UrlOptions {
    /// Literal pool; when non-empty, picked from instead of synthesizing.
    pub urls: Vec<String>,
    pub proto: String,
    pub tld: String,
    /// Sub-generator for the host core.
    pub core: Arc<dyn Generator>,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            proto: "http://".to_string(),
            tld: ".com".to_string(),
            core: Arc::new(TextGenerator::default()),
        }
    }
}

/// Composed URL: a literal pool pick, or `proto + core + tld`.
#[derive(Clone)]
pub struct UrlGenerator {
    urls: Vec<String>,
    proto: String,
    tld: String,
    core: Arc<dyn Generator>,
}

impl UrlGenerator {
    pub fn new(options: UrlOptions) -> Self {
        Self {
            urls: options.urls,
            proto: options.proto,
            tld: options.tld,
            core: options.core,
        }
    }
}

impl Default for UrlGenerator {
    fn default() -> Self {
        Self::new(UrlOptions::default())
    }
}

impl Generator for UrlGenerator {
    fn name(&self) -> &'static str {
        "url"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        if !self.urls.is_empty() {
            let idx = ctx.rng.random_range(0..self.urls.len());
            return Ok(Some(FieldValue::Text(self.urls[idx].clone())));
        }
        let Some(core) = self.core.produce(ctx, None)? else {
            return Ok(None);
        };
        let core = render_scalar(&core).unwrap_or_default();
        Ok(Some(FieldValue::Text(format!(
            "{}{}{}",
            self.proto, core, self.tld
        ))))
    }
}

/// Options for [`EmailGenerator`].
#[derive(Clone)]
pub struct EmailOptions {
    /// Literal pool; when non-empty, picked from instead of synthesizing.
    pub emails: Vec<String>,
    pub domain: String,
    /// Sub-generator for the local part.
    pub core: Arc<dyn Generator>,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            emails: Vec::new(),
            domain: "test.com".to_string(),
            core: Arc::new(TextGenerator::default()),
        }
    }
}

/// Composed email: a literal pool pick, or `core + "@" + domain`.
#[derive(Clone)]
pub struct EmailGenerator {
    emails: Vec<String>,
    domain: String,
    core: Arc<dyn Generator>,
}

impl EmailGenerator {
    pub fn new(options: EmailOptions) -> Self {
        Self {
            emails: options.emails,
            domain: options.domain,
            core: options.core,
        }
    }
}

impl Default for EmailGenerator {
    fn default() -> Self {
        Self::new(EmailOptions::default())
    }
}

impl Generator for EmailGenerator {
    fn name(&self) -> &'static str {
        "email"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        if !self.emails.is_empty() {
            let idx = ctx.rng.random_range(0..self.emails.len());
            return Ok(Some(FieldValue::Text(self.emails[idx].clone())));
        }
        let Some(core) = self.core.produce(ctx, None)? else {
            return Ok(None);
        };
        let core = render_scalar(&core).unwrap_or_default();
        Ok(Some(FieldValue::Text(format!("{}@{}", core, self.domain))))
    }
}

/// Options for [`DateGenerator`].
#[derive(Debug, Clone)]
pub struct DateOptions {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateOptions {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }
}

fn validate_date_range(
    ctx: &'static str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), GenerationError> {
    if start > end {
        return Err(GenerationError::InvalidOptions(format!(
            "{ctx}: start {start} must be <= end {end}"
        )));
    }
    Ok(())
}

fn random_date(ctx: &mut ProduceContext<'_>, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    start + chrono::Duration::days(ctx.rng.random_range(0..=span))
}

fn random_time(ctx: &mut ProduceContext<'_>, microseconds: bool) -> NaiveTime {
    let micro = if microseconds {
        ctx.rng.random_range(0..1_000_000)
    } else {
        0
    };
    let hour = ctx.rng.random_range(0..24);
    let minute = ctx.rng.random_range(0..60);
    let second = ctx.rng.random_range(0..60);
    NaiveTime::from_hms_micro_opt(hour, minute, second, micro).unwrap_or_default()
}

/// Uniform day within the configured range (default: start of the current
/// year to today).
#[derive(Debug, Clone)]
pub struct DateGenerator {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateGenerator {
    pub fn new(options: DateOptions) -> Result<Self, GenerationError> {
        validate_date_range("date", options.start, options.end)?;
        Ok(Self {
            start: options.start,
            end: options.end,
        })
    }
}

impl Default for DateGenerator {
    fn default() -> Self {
        let options = DateOptions::default();
        Self {
            start: options.start,
            end: options.end,
        }
    }
}

impl Generator for DateGenerator {
    fn name(&self) -> &'static str {
        "date"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        Ok(Some(FieldValue::Date(random_date(
            ctx, self.start, self.end,
        ))))
    }
}

/// Options for [`TimeGenerator`].
#[derive(Debug, Clone, Default)]
pub struct TimeOptions {
    /// Include random microseconds.
    pub microseconds: bool,
}

/// Uniform hour/minute/second, with optional sub-second precision.
#[derive(Debug, Clone, Default)]
pub struct TimeGenerator {
    microseconds: bool,
}

impl TimeGenerator {
    pub fn new(options: TimeOptions) -> Self {
        Self {
            microseconds: options.microseconds,
        }
    }
}

impl Generator for TimeGenerator {
    fn name(&self) -> &'static str {
        "time"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        Ok(Some(FieldValue::Time(random_time(ctx, self.microseconds))))
    }
}

/// Options for [`DateTimeGenerator`].
#[derive(Debug, Clone, Default)]
pub struct DateTimeOptions {
    pub date: DateOptions,
    pub time: TimeOptions,
    /// Force sub-second precision onto the time part.
    pub precise: bool,
}

/// Combines a random date and time; `precise` propagates sub-second
/// precision into the time part.
#[derive(Debug, Clone)]
pub struct DateTimeGenerator {
    start: NaiveDate,
    end: NaiveDate,
    microseconds: bool,
}

impl DateTimeGenerator {
    pub fn new(options: DateTimeOptions) -> Result<Self, GenerationError> {
        validate_date_range("datetime", options.date.start, options.date.end)?;
        Ok(Self {
            start: options.date.start,
            end: options.date.end,
            microseconds: options.precise || options.time.microseconds,
        })
    }

    /// Datetime generator with sub-second precision enabled.
    pub fn precise() -> Self {
        Self {
            microseconds: true,
            ..Self::default()
        }
    }
}

impl Default for DateTimeGenerator {
    fn default() -> Self {
        let options = DateOptions::default();
        Self {
            start: options.start,
            end: options.end,
            microseconds: false,
        }
    }
}

impl Generator for DateTimeGenerator {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        if let Some(choice) = ctx.pick_choice(field) {
            return Ok(Some(choice));
        }
        let date = random_date(ctx, self.start, self.end);
        let time = random_time(ctx, self.microseconds);
        Ok(Some(FieldValue::DateTime(NaiveDateTime::new(date, time))))
    }
}

/// Random v4-style identifier for id fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl Generator for IdGenerator {
    fn name(&self) -> &'static str {
        "id"
    }

    fn produce(
        &self,
        ctx: &mut ProduceContext<'_>,
        _field: Option<&FieldDescriptor>,
    ) -> Result<Option<FieldValue>, GenerationError> {
        let mut bytes = [0_u8; 16];
        ctx.rng.fill_bytes(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Ok(Some(FieldValue::Id(
            uuid::Uuid::from_bytes(bytes).to_string(),
        )))
    }
}
