//! Groups people by hometown. The input is one `hometown<TAB>fullname` record
//! per line; the output lists every hometown with at least two people in it,
//! in ascending order, followed by their names in input order.

use std::io::{self, BufRead, Write};

use crate::{
    array_list::ArrayList,
    error::{Error, Result},
    mapping::Mapping,
};

/// The longest hometown a record may carry, in bytes.
pub const MAX_HOMETOWN_LEN: usize = 31;

/// The longest full name a record may carry, in bytes.
pub const MAX_FULLNAME_LEN: usize = 63;

/// One line of a grouping input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub hometown: String,
    pub fullname: String,
}

/// Splits a `hometown<TAB>fullname` line into a record. `line_no` only
/// exists to be reported back in the error.
pub fn parse_record(line: &str, line_no: usize) -> Result<Record> {
    let malformed = || Error::MalformedRecord { line: line_no };

    let (hometown, fullname) = match line.find('\t') {
        Some(tab) => (&line[..tab], &line[tab + 1..]),
        None => return Err(malformed()),
    };

    if hometown.is_empty()
        || fullname.is_empty()
        || hometown.len() > MAX_HOMETOWN_LEN
        || fullname.len() > MAX_FULLNAME_LEN
    {
        return Err(malformed());
    }

    Ok(Record {
        hometown: hometown.to_owned(),
        fullname: fullname.to_owned(),
    })
}

/// Reads every record from `reader` and files each name under its hometown,
/// creating the hometown's list on first sight. Blank lines are skipped but
/// still counted, so errors name the line as it appears in the file. Returns
/// the number of records read.
pub fn index_records<R, M>(reader: R, dict: &mut M) -> Result<usize>
where
    R: BufRead,
    M: Mapping<String, ArrayList<String>>,
{
    let mut count = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let record = parse_record(line, i + 1)?;
        add_entry(dict, record);
        count += 1;
    }

    tracing::info!(records = count, hometowns = dict.len(), "indexed records");
    Ok(count)
}

/// Appends the record's name to its hometown's list.
pub fn add_entry<M>(dict: &mut M, record: Record)
where
    M: Mapping<String, ArrayList<String>>,
{
    let Record { hometown, fullname } = record;

    match dict.get_mut(&hometown) {
        Some(names) => names.append(fullname),
        None => {
            tracing::debug!(%hometown, "new hometown");
            let mut names = ArrayList::new();
            names.append(fullname);
            dict.insert(hometown, names);
        }
    }
}

/// Writes every hometown shared by at least two people, then their names one
/// per line, then a blank line.
pub fn write_groups<M, W>(dict: &M, out: &mut W) -> io::Result<()>
where
    M: Mapping<String, ArrayList<String>>,
    W: Write,
{
    let mut result = Ok(());

    // walks can't bail out early, so once a write fails the rest of the
    // visits are no-ops
    dict.walk(|hometown, names| {
        if result.is_ok() && names.len() >= 2 {
            result = write_group(&mut *out, hometown, names);
        }
    });

    result
}

fn write_group<W: Write>(out: &mut W, hometown: &str, names: &ArrayList<String>) -> io::Result<()> {
    writeln!(out, "{}:", hometown)?;
    for name in names {
        writeln!(out, "{}", name)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::{index_records, parse_record, write_groups, Record};
    use crate::{error::Error, Dict, Mapping};

    const INPUT: &str = "Chicago\tAlice Smith\n\
                         Boston\tBob Jones\n\
                         Chicago\tCarol White\n\
                         Austin\tDave Brown\n\
                         Boston\tErin Black\n\
                         Chicago\tFrank Green\n";

    const EXPECTED: &str = "Boston:\nBob Jones\nErin Black\n\n\
                            Chicago:\nAlice Smith\nCarol White\nFrank Green\n\n";

    #[test]
    fn test_parse_record() {
        assert_eq!(
            Record {
                hometown: "Chicago".to_owned(),
                fullname: "Alice Smith".to_owned(),
            },
            parse_record("Chicago\tAlice Smith", 1).unwrap()
        );

        assert!(matches!(
            parse_record("Chicago Alice Smith", 4),
            Err(Error::MalformedRecord { line: 4 })
        ));
        assert!(matches!(
            parse_record("\tAlice Smith", 2),
            Err(Error::MalformedRecord { line: 2 })
        ));

        let long_town = format!("{}\tAlice", "x".repeat(32));
        assert!(parse_record(&long_town, 1).is_err());
    }

    #[test]
    fn test_groups_with_table() {
        let mut dict = Dict::create_table(1024);
        assert_eq!(6, index_records(INPUT.as_bytes(), &mut dict).unwrap());
        assert_eq!(3, dict.len());

        let mut out = Vec::new();
        write_groups(&dict, &mut out).unwrap();
        assert_eq!(EXPECTED, String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_groups_with_map() {
        let mut dict = Dict::create_map();
        index_records(INPUT.as_bytes(), &mut dict).unwrap();

        assert_eq!(
            Some("Dave Brown"),
            dict.get(&"Austin".to_owned())
                .and_then(|names| names.get(0))
                .map(String::as_str)
        );

        let mut out = Vec::new();
        write_groups(&dict, &mut out).unwrap();
        assert_eq!(EXPECTED, String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut dict = Dict::create_table(16);
        let input = "Chicago\tAlice Smith\n\nChicago\tCarol White\r\n\r\nBoston\tBob Jones\n\n";

        assert_eq!(3, index_records(input.as_bytes(), &mut dict).unwrap());
        assert_eq!(2, dict.len());

        let mut out = Vec::new();
        write_groups(&dict, &mut out).unwrap();
        assert_eq!(
            "Chicago:\nAlice Smith\nCarol White\n\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn test_malformed_line_after_blank_lines() {
        let mut dict = Dict::create_map();
        let input = "Chicago\tAlice Smith\n\n\nBoston Bob Jones\n";

        assert!(matches!(
            index_records(input.as_bytes(), &mut dict),
            Err(Error::MalformedRecord { line: 4 })
        ));
    }

    #[test]
    fn test_incomplete_record() {
        let mut dict = Dict::create_map();
        let input = "Chicago\tAlice Smith\nBoston\n";

        assert!(matches!(
            index_records(input.as_bytes(), &mut dict),
            Err(Error::MalformedRecord { line: 2 })
        ));
    }
}
