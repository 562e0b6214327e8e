//! Keyword tables for the MySQL dialect.
//!
//! Both tables are sorted so `lookup` can binary-search them; a unit test
//! below keeps that honest.

use crate::lexer::TokenKind;

pub(crate) static KEYWORDS: &[(&str, TokenKind)] = &[
    ("AGAINST", TokenKind::Against),
    ("ALL", TokenKind::All),
    ("AND", TokenKind::And),
    ("ANY", TokenKind::Any),
    ("AS", TokenKind::As),
    ("ASC", TokenKind::Asc),
    ("BETWEEN", TokenKind::Between),
    ("BINARY", TokenKind::Binary),
    ("BOOLEAN", TokenKind::Boolean),
    ("BY", TokenKind::By),
    ("CASE", TokenKind::Case),
    ("CHARACTER", TokenKind::Character),
    ("COLLATE", TokenKind::Collate),
    ("COLUMNS", TokenKind::Columns),
    ("CROSS", TokenKind::Cross),
    ("DATE", TokenKind::Date),
    ("DESC", TokenKind::Desc),
    ("DISTINCT", TokenKind::Distinct),
    ("DISTINCTROW", TokenKind::Distinctrow),
    ("DIV", TokenKind::Div),
    ("DUMPFILE", TokenKind::Dumpfile),
    ("ELSE", TokenKind::Else),
    ("ENCLOSED", TokenKind::Enclosed),
    ("END", TokenKind::End),
    ("ESCAPE", TokenKind::Escape),
    ("ESCAPED", TokenKind::Escaped),
    ("EXISTS", TokenKind::Exists),
    ("EXPANSION", TokenKind::Expansion),
    ("FALSE", TokenKind::False),
    ("FIELDS", TokenKind::Fields),
    ("FOR", TokenKind::For),
    ("FORCE", TokenKind::Force),
    ("FROM", TokenKind::From),
    ("GROUP", TokenKind::Group),
    ("HAVING", TokenKind::Having),
    ("HIGH_PRIORITY", TokenKind::HighPriority),
    ("IGNORE", TokenKind::Ignore),
    ("IN", TokenKind::In),
    ("INDEX", TokenKind::Index),
    ("INNER", TokenKind::Inner),
    ("INTERVAL", TokenKind::Interval),
    ("INTO", TokenKind::Into),
    ("IS", TokenKind::Is),
    ("JOIN", TokenKind::Join),
    ("KEY", TokenKind::Key),
    ("LANGUAGE", TokenKind::Language),
    ("LEFT", TokenKind::Left),
    ("LIKE", TokenKind::Like),
    ("LIMIT", TokenKind::Limit),
    ("LINES", TokenKind::Lines),
    ("LOCK", TokenKind::Lock),
    ("MATCH", TokenKind::Match),
    ("MOD", TokenKind::Mod),
    ("MODE", TokenKind::Mode),
    ("NATURAL", TokenKind::Natural),
    ("NOT", TokenKind::Not),
    ("NULL", TokenKind::Null),
    ("OFFSET", TokenKind::Offset),
    ("ON", TokenKind::On),
    ("OPTIONALLY", TokenKind::Optionally),
    ("OR", TokenKind::Or),
    ("ORDER", TokenKind::Order),
    ("OUTER", TokenKind::Outer),
    ("OUTFILE", TokenKind::Outfile),
    ("PARTITION", TokenKind::Partition),
    ("PROCEDURE", TokenKind::Procedure),
    ("QUERY", TokenKind::Query),
    ("REGEXP", TokenKind::Regexp),
    ("RIGHT", TokenKind::Right),
    ("ROW", TokenKind::Row),
    ("SELECT", TokenKind::Select),
    ("SET", TokenKind::Set),
    ("SHARE", TokenKind::Share),
    ("SOUNDS", TokenKind::Sounds),
    ("SQL_BIG_RESULT", TokenKind::SqlBigResult),
    ("SQL_BUFFER_RESULT", TokenKind::SqlBufferResult),
    ("SQL_CACHE", TokenKind::SqlCache),
    ("SQL_CALC_FOUND_ROWS", TokenKind::SqlCalcFoundRows),
    ("SQL_NO_CACHE", TokenKind::SqlNoCache),
    ("SQL_SMALL_RESULT", TokenKind::SqlSmallResult),
    ("STARTING", TokenKind::Starting),
    ("STRAIGHT", TokenKind::Straight),
    ("STRAIGHT_JOIN", TokenKind::StraightJoin),
    ("TERMINATED", TokenKind::Terminated),
    ("THEN", TokenKind::Then),
    ("TIME", TokenKind::Time),
    ("TIMESTAMP", TokenKind::Timestamp),
    ("TRUE", TokenKind::True),
    ("UNKNOWN", TokenKind::Unknown),
    ("UPDATE", TokenKind::Update),
    ("USE", TokenKind::Use),
    ("USING", TokenKind::Using),
    ("WHEN", TokenKind::When),
    ("WHERE", TokenKind::Where),
    ("WITH", TokenKind::With),
    ("XOR", TokenKind::Xor),
];

/// Time unit names that may follow `INTERVAL <expr>`.
pub(crate) static INTERVAL_UNITS: &[&str] = &[
    "DAY",
    "DAY_HOUR",
    "DAY_MICROSECOND",
    "DAY_MINUTE",
    "DAY_SECOND",
    "HOUR",
    "HOUR_MICROSECOND",
    "HOUR_MINUTE",
    "HOUR_SECOND",
    "MICROSECOND",
    "MINUTE",
    "MINUTE_MICROSECOND",
    "MINUTE_SECOND",
    "MONTH",
    "SECOND",
    "SECOND_MICROSECOND",
    "YEAR",
    "YEAR_MONTH",
];

/// Case-insensitive keyword lookup. Words that hit neither table lex as
/// plain identifiers.
pub(crate) fn lookup(word: &str) -> Option<TokenKind> {
    let word = word.to_ascii_uppercase();

    if INTERVAL_UNITS.binary_search(&word.as_str()).is_ok() {
        return Some(TokenKind::IntervalUnit);
    }

    KEYWORDS
        .binary_search_by(|&(name, _)| name.cmp(word.as_str()))
        .ok()
        .map(|index| KEYWORDS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted() {
        for window in KEYWORDS.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "{} must sort before {}",
                window[0].0,
                window[1].0
            );
        }

        for window in INTERVAL_UNITS.windows(2) {
            assert!(
                window[0] < window[1],
                "{} must sort before {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("select"), Some(TokenKind::Select));
        assert_eq!(lookup("SeLeCt"), Some(TokenKind::Select));
        assert_eq!(lookup("SQL_CALC_FOUND_ROWS"), Some(TokenKind::SqlCalcFoundRows));
        assert_eq!(lookup("year"), Some(TokenKind::IntervalUnit));
        assert_eq!(lookup("second_microsecond"), Some(TokenKind::IntervalUnit));
        assert_eq!(lookup("foo"), None);
        assert_eq!(lookup("selec"), None);
    }
}
