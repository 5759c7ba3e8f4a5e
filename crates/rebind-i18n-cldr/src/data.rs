//! Date/time format tables, one flat table per locale.
//!
//! Each table lists only the keys that differ from its parent in the
//! fallback chain; `root` carries every key. Generated from CLDR.

/// A table cell: a single pattern or an ordered list of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Text(&'static str),
    List(&'static [&'static str]),
}

/// The data declared for one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleTable {
    /// Locale tag as it appears in resource names (`""` for root).
    pub locale: &'static str,
    pub entries: &'static [(&'static str, Cell)],
}

use Cell::{List, Text};

const Q1_Q4: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

pub static ROOT: LocaleTable = LocaleTable {
    locale: "",
    entries: &[
        ("ampms", List(&["AM", "PM"])),
        ("dateFormatFull", Text("EEEE, MMMM d, y")),
        ("dateFormatLong", Text("MMMM d, y")),
        ("dateFormatMedium", Text("MMM d, y")),
        ("dateFormatShort", Text("M/d/yy")),
        ("dateTimeFull", Text("{1} 'at' {0}")),
        ("dateTimeLong", Text("{1} 'at' {0}")),
        ("dateTimeMedium", Text("{1}, {0}")),
        ("dateTimeShort", Text("{1}, {0}")),
        ("erasFull", List(&["Before Christ", "Anno Domini"])),
        ("erasShort", List(&["BC", "AD"])),
        ("firstDayOfTheWeek", Text("0")),
        ("formatDay", Text("d")),
        ("formatHour12Minute", Text("h:mm a")),
        ("formatHour12MinuteSecond", Text("h:mm:ss a")),
        ("formatHour24Minute", Text("HH:mm")),
        ("formatHour24MinuteSecond", Text("HH:mm:ss")),
        ("formatMinuteSecond", Text("mm:ss")),
        ("formatMonthAbbrev", Text("LLL")),
        ("formatMonthAbbrevDay", Text("MMM d")),
        ("formatMonthFull", Text("LLLL")),
        ("formatMonthFullDay", Text("MMMM d")),
        ("formatMonthFullWeekdayDay", Text("EEEE, MMMM d")),
        ("formatMonthNumDay", Text("M/d")),
        ("formatYear", Text("y")),
        ("formatYearMonthAbbrev", Text("MMM y")),
        ("formatYearMonthAbbrevDay", Text("MMM d, y")),
        ("formatYearMonthFull", Text("MMMM y")),
        ("formatYearMonthFullDay", Text("MMMM d, y")),
        ("formatYearMonthNum", Text("M/y")),
        ("formatYearMonthNumDay", Text("M/d/y")),
        ("formatYearMonthWeekdayDay", Text("EEE, MMM d, y")),
        ("formatYearQuarterFull", Text("QQQQ y")),
        ("formatYearQuarterShort", Text("Q y")),
        (
            "monthsFull",
            List(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
        ),
        (
            "monthsNarrow",
            List(&["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]),
        ),
        (
            "monthsShort",
            List(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
        ),
        (
            "quartersFull",
            List(&["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"]),
        ),
        ("quartersShort", List(Q1_Q4)),
        ("timeFormatFull", Text("h:mm:ss a zzzz")),
        ("timeFormatLong", Text("h:mm:ss a z")),
        ("timeFormatMedium", Text("h:mm:ss a")),
        ("timeFormatShort", Text("h:mm a")),
        (
            "weekdaysFull",
            List(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
        ),
        ("weekdaysNarrow", List(&["S", "M", "T", "W", "T", "F", "S"])),
        (
            "weekdaysShort",
            List(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
        ),
        ("weekendEnd", Text("0")),
        ("weekendStart", Text("6")),
    ],
};

pub static AZ: LocaleTable = LocaleTable {
    locale: "az",
    entries: &[
        ("dateFormatFull", Text("d MMMM y, EEEE")),
        ("dateFormatLong", Text("d MMMM y")),
        ("dateFormatMedium", Text("d MMM y")),
        ("dateFormatShort", Text("dd.MM.yy")),
        ("dateTimeFull", Text("{1} {0}")),
        ("dateTimeLong", Text("{1} {0}")),
        ("dateTimeMedium", Text("{1} {0}")),
        ("dateTimeShort", Text("{1} {0}")),
        ("erasFull", List(&["eramızdan əvvəl", "yeni era"])),
        ("erasShort", List(&["e.ə.", "y.e."])),
        ("firstDayOfTheWeek", Text("1")),
        ("formatMonthAbbrevDay", Text("d MMM")),
        ("formatMonthFullDay", Text("d MMMM")),
        ("formatMonthFullWeekdayDay", Text("d MMMM, EEEE")),
        ("formatMonthNumDay", Text("dd.MM")),
        ("formatYearMonthAbbrev", Text("MMM y")),
        ("formatYearMonthAbbrevDay", Text("d MMM y")),
        ("formatYearMonthFull", Text("MMMM y")),
        ("formatYearMonthFullDay", Text("d MMMM y")),
        ("formatYearMonthNum", Text("MM.y")),
        ("formatYearMonthNumDay", Text("dd.MM.y")),
        ("formatYearMonthWeekdayDay", Text("d MMM y, EEE")),
        ("formatYearQuarterFull", Text("y QQQQ")),
        ("formatYearQuarterShort", Text("y Q")),
        (
            "monthsFull",
            List(&[
                "yanvar", "fevral", "mart", "aprel", "may", "iyun", "iyul", "avqust", "sentyabr",
                "oktyabr", "noyabr", "dekabr",
            ]),
        ),
        (
            "monthsShort",
            List(&[
                "yan", "fev", "mar", "apr", "may", "iyn", "iyl", "avq", "sen", "okt", "noy", "dek",
            ]),
        ),
        (
            "quartersFull",
            List(&["1-ci kvartal", "2-ci kvartal", "3-cü kvartal", "4-cü kvartal"]),
        ),
        (
            "quartersShort",
            List(&["1-ci kv.", "2-ci kv.", "3-cü kv.", "4-cü kv."]),
        ),
        ("timeFormatFull", Text("HH:mm:ss zzzz")),
        ("timeFormatLong", Text("HH:mm:ss z")),
        ("timeFormatMedium", Text("HH:mm:ss")),
        ("timeFormatShort", Text("HH:mm")),
        (
            "weekdaysFull",
            List(&[
                "bazar",
                "bazar ertəsi",
                "çərşənbə axşamı",
                "çərşənbə",
                "cümə axşamı",
                "cümə",
                "şənbə",
            ]),
        ),
        (
            "weekdaysShort",
            List(&["B.", "B.E.", "Ç.A.", "Ç.", "C.A.", "C.", "Ş."]),
        ),
    ],
};

const AZ_CYRL_MONTHS: &[&str] = &[
    "јанвар",
    "феврал",
    "март",
    "апрел",
    "май",
    "ијун",
    "ијул",
    "август",
    "сентјабр",
    "октјабр",
    "нојабр",
    "декабр",
];

const AZ_CYRL_WEEKDAYS: &[&str] = &[
    "базар",
    "базар ертәси",
    "чәршәнбә ахшамы",
    "чәршәнбә",
    "ҹүмә ахшамы",
    "ҹүмә",
    "шәнбә",
];

pub static AZ_CYRL: LocaleTable = LocaleTable {
    locale: "az_Cyrl",
    entries: &[
        ("dateFormatFull", Text("EEEE, d, MMMM, y")),
        ("dateFormatLong", Text("d MMMM, y")),
        ("dateFormatMedium", Text("d MMM, y")),
        ("erasFull", List(&["BCE", "CE"])),
        ("erasShort", List(&["BCE", "CE"])),
        ("formatMonthFullWeekdayDay", Text("EEEE, d, MMMM")),
        ("formatYearMonthAbbrev", Text("MMM, y")),
        ("formatYearMonthAbbrevDay", Text("d MMM, y")),
        ("formatYearMonthFull", Text("MMMM, y")),
        ("formatYearMonthFullDay", Text("d MMMM, y")),
        ("formatYearMonthWeekdayDay", Text("EEE, d, MMM, y")),
        ("monthsFull", List(AZ_CYRL_MONTHS)),
        ("monthsShort", List(AZ_CYRL_MONTHS)),
        ("quartersFull", List(Q1_Q4)),
        ("quartersShort", List(Q1_Q4)),
        ("weekdaysFull", List(AZ_CYRL_WEEKDAYS)),
        ("weekdaysShort", List(AZ_CYRL_WEEKDAYS)),
    ],
};

/// Every bundled table, root first.
pub static TABLES: [&LocaleTable; 3] = [&ROOT, &AZ, &AZ_CYRL];
