//! Typed date/time format information for one locale.
//!
//! A [`DateTimeFormatInfo`] is built by resolving the requested locale
//! against the bundled tables and reading every key through the lookup
//! engine, so a locale only overrides what differs from its ancestors:
//! `az_Cyrl_AZ` takes its month names from `az_Cyrl`, its short date
//! format from `az` and its narrow weekday names from root.

use rebind_i18n::{KeyLookupEngine, LocaleTag, ResourceCache, ResourceList, ResourceSet};

use crate::error::{CldrError, Result};

/// Pattern width, as in CLDR `full`/`long`/`medium`/`short`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatLength {
    Full,
    Long,
    Medium,
    Short,
}

impl FormatLength {
    pub const ALL: [Self; 4] = [Self::Full, Self::Long, Self::Medium, Self::Short];
}

/// Per-length pattern set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LengthPatterns {
    pub full: String,
    pub long: String,
    pub medium: String,
    pub short: String,
}

impl LengthPatterns {
    #[must_use]
    pub fn get(&self, length: FormatLength) -> &str {
        match length {
            FormatLength::Full => &self.full,
            FormatLength::Long => &self.long,
            FormatLength::Medium => &self.medium,
            FormatLength::Short => &self.short,
        }
    }
}

/// Skeleton-derived patterns (`formatYearMonthAbbrev` and friends).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkeletonPatterns {
    pub day: String,
    pub hour12_minute: String,
    pub hour12_minute_second: String,
    pub hour24_minute: String,
    pub hour24_minute_second: String,
    pub minute_second: String,
    pub month_abbrev: String,
    pub month_abbrev_day: String,
    pub month_full: String,
    pub month_full_day: String,
    pub month_full_weekday_day: String,
    pub month_num_day: String,
    pub year: String,
    pub year_month_abbrev: String,
    pub year_month_abbrev_day: String,
    pub year_month_full: String,
    pub year_month_full_day: String,
    pub year_month_num: String,
    pub year_month_num_day: String,
    pub year_month_weekday_day: String,
    pub year_quarter_full: String,
    pub year_quarter_short: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatInfo {
    /// Locale of the most specific table that contributed.
    pub locale: LocaleTag,
    pub date_formats: LengthPatterns,
    pub time_formats: LengthPatterns,
    /// `{1}` is the date, `{0}` the time.
    pub date_time_formats: LengthPatterns,
    pub skeletons: SkeletonPatterns,
    pub ampms: Vec<String>,
    pub eras_full: Vec<String>,
    pub eras_short: Vec<String>,
    pub months_full: Vec<String>,
    pub months_narrow: Vec<String>,
    pub months_short: Vec<String>,
    pub quarters_full: Vec<String>,
    pub quarters_short: Vec<String>,
    pub weekdays_full: Vec<String>,
    pub weekdays_narrow: Vec<String>,
    pub weekdays_short: Vec<String>,
    /// 0 = Sunday.
    pub first_day_of_the_week: u8,
    pub weekend_start: u8,
    pub weekend_end: u8,
}

impl DateTimeFormatInfo {
    /// Resolve `locale` through `cache` and read every field.
    pub fn resolve(cache: &ResourceCache, resources: &ResourceSet, locale: &LocaleTag) -> Result<Self> {
        let list = cache.get_or_resolve(resources, locale);
        let info = Self::from_list(&list)?;
        tracing::debug!(requested = %locale, effective = %info.locale, "resolved date/time info");
        Ok(info)
    }

    /// Read every field from an already resolved chain.
    pub fn from_list(list: &ResourceList) -> Result<Self> {
        let r = Reader {
            list,
            engine: KeyLookupEngine::default(),
        };
        Ok(Self {
            locale: list.effective_locale(),
            date_formats: r.lengths([
                "dateFormatFull",
                "dateFormatLong",
                "dateFormatMedium",
                "dateFormatShort",
            ])?,
            time_formats: r.lengths([
                "timeFormatFull",
                "timeFormatLong",
                "timeFormatMedium",
                "timeFormatShort",
            ])?,
            date_time_formats: r.lengths([
                "dateTimeFull",
                "dateTimeLong",
                "dateTimeMedium",
                "dateTimeShort",
            ])?,
            skeletons: SkeletonPatterns {
                day: r.text("formatDay")?,
                hour12_minute: r.text("formatHour12Minute")?,
                hour12_minute_second: r.text("formatHour12MinuteSecond")?,
                hour24_minute: r.text("formatHour24Minute")?,
                hour24_minute_second: r.text("formatHour24MinuteSecond")?,
                minute_second: r.text("formatMinuteSecond")?,
                month_abbrev: r.text("formatMonthAbbrev")?,
                month_abbrev_day: r.text("formatMonthAbbrevDay")?,
                month_full: r.text("formatMonthFull")?,
                month_full_day: r.text("formatMonthFullDay")?,
                month_full_weekday_day: r.text("formatMonthFullWeekdayDay")?,
                month_num_day: r.text("formatMonthNumDay")?,
                year: r.text("formatYear")?,
                year_month_abbrev: r.text("formatYearMonthAbbrev")?,
                year_month_abbrev_day: r.text("formatYearMonthAbbrevDay")?,
                year_month_full: r.text("formatYearMonthFull")?,
                year_month_full_day: r.text("formatYearMonthFullDay")?,
                year_month_num: r.text("formatYearMonthNum")?,
                year_month_num_day: r.text("formatYearMonthNumDay")?,
                year_month_weekday_day: r.text("formatYearMonthWeekdayDay")?,
                year_quarter_full: r.text("formatYearQuarterFull")?,
                year_quarter_short: r.text("formatYearQuarterShort")?,
            },
            ampms: r.names("ampms", 2)?,
            eras_full: r.names("erasFull", 2)?,
            eras_short: r.names("erasShort", 2)?,
            months_full: r.names("monthsFull", 12)?,
            months_narrow: r.names("monthsNarrow", 12)?,
            months_short: r.names("monthsShort", 12)?,
            quarters_full: r.names("quartersFull", 4)?,
            quarters_short: r.names("quartersShort", 4)?,
            weekdays_full: r.names("weekdaysFull", 7)?,
            weekdays_narrow: r.names("weekdaysNarrow", 7)?,
            weekdays_short: r.names("weekdaysShort", 7)?,
            first_day_of_the_week: r.day("firstDayOfTheWeek")?,
            weekend_start: r.day("weekendStart")?,
            weekend_end: r.day("weekendEnd")?,
        })
    }

    #[must_use]
    pub fn date_format(&self, length: FormatLength) -> &str {
        self.date_formats.get(length)
    }

    #[must_use]
    pub fn time_format(&self, length: FormatLength) -> &str {
        self.time_formats.get(length)
    }

    /// Combine a date and a time pattern with the `length` glue pattern.
    #[must_use]
    pub fn date_time(&self, length: FormatLength, date_pattern: &str, time_pattern: &str) -> String {
        self.date_time_formats
            .get(length)
            .replace("{1}", date_pattern)
            .replace("{0}", time_pattern)
    }

    /// Full date and time pattern of the same length.
    #[must_use]
    pub fn date_time_format(&self, length: FormatLength) -> String {
        self.date_time(length, self.date_format(length), self.time_format(length))
    }
}

struct Reader<'a> {
    list: &'a ResourceList,
    engine: KeyLookupEngine,
}

impl Reader<'_> {
    fn text(&self, key: &'static str) -> Result<String> {
        let found = self.engine.lookup(self.list, key, None)?;
        found
            .value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| wrong_shape(key, found.locale, "a pattern"))
    }

    fn names(&self, key: &'static str, len: usize) -> Result<Vec<String>> {
        let found = self.engine.lookup(self.list, key, None)?;
        let names = found.value.to_list();
        if found.value.as_list().is_none() || names.len() != len {
            return Err(wrong_shape(key, found.locale, "a list of names of the expected length"));
        }
        Ok(names)
    }

    fn day(&self, key: &'static str) -> Result<u8> {
        let found = self.engine.lookup(self.list, key, None)?;
        found
            .value
            .as_text()
            .and_then(|text| text.trim().parse::<u8>().ok())
            .filter(|day| *day < 7)
            .ok_or_else(|| wrong_shape(key, found.locale, "a day index 0-6"))
    }

    /// Keys in `FormatLength::ALL` order.
    fn lengths(&self, keys: [&'static str; 4]) -> Result<LengthPatterns> {
        let [full, long, medium, short] = keys;
        Ok(LengthPatterns {
            full: self.text(full)?,
            long: self.text(long)?,
            medium: self.text(medium)?,
            short: self.text(short)?,
        })
    }
}

fn wrong_shape(key: &'static str, locale: &LocaleTag, expected: &'static str) -> CldrError {
    CldrError::WrongShape {
        key,
        locale: locale.to_string(),
        expected,
    }
}
