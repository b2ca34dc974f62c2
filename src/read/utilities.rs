use nom::branch::alt;
use nom::bytes::complete::{is_not, take_till};
use nom::character::complete::{char, digit1, one_of, space0};
use nom::combinator::{all_consuming, map_res, recognize};
use nom::multi::many0;
use nom::number::complete::double;
use nom::sequence::{delimited, terminated};
use nom::IResult;

use std::io::BufRead;

use crate::error::{Error, Result};

/// Pulls trimmed lines out of a reader and counts them.
pub(crate) struct LineReader<R> {
    reader: R,
    line: usize,
    raw: Vec<u8>,
    text: String,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            raw: vec![],
            text: String::new(),
        }
    }

    /// 1-based number of the last line handed out.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn next_line(&mut self) -> Result<Option<&str>> {
        self.raw.clear();
        if self.reader.read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        self.text = String::from_utf8_lossy(&self.raw).into_owned();
        Ok(Some(self.text.trim()))
    }
}

fn bvh_word(i: &str) -> IResult<&str, &str> {
    delimited(
        space0,
        alt((recognize(one_of("{}:")), is_not(" \t{}:"))),
        space0,
    )(i)
}

/// Splits a line on blanks, with `{`, `}` and `:` always standing alone.
pub(crate) fn bvh_words(line: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(many0(bvh_word))(line)
}

/// Everything in front of a `#`.
pub(crate) fn uncomment(line: &str) -> &str {
    let res: IResult<&str, &str> = take_till(|c: char| c == '#')(line);
    match res {
        Ok((_, text)) => text.trim_end(),
        Err(_) => line,
    }
}

pub(crate) fn number(word: &str) -> Option<f64> {
    let res: IResult<&str, f64> = all_consuming(double)(word);
    res.ok().map(|(_, n)| n)
}

pub(crate) fn unsigned(word: &str) -> Option<usize> {
    let res: IResult<&str, usize> =
        all_consuming(map_res(digit1, |s: &str| s.parse::<usize>()))(word);
    res.ok().map(|(_, n)| n)
}

/// `12:` style counters used by HTR frame and bone lines.
pub(crate) fn indexed(word: &str) -> Option<usize> {
    let res: IResult<&str, usize> = all_consuming(terminated(
        map_res(digit1, |s: &str| s.parse::<usize>()),
        char(':'),
    ))(word);
    res.ok().map(|(_, n)| n)
}

/// Parses every word as a number, failing on the first one that isn't.
pub(crate) fn numbers<S: AsRef<str>>(words: &[S], line: usize) -> Result<Vec<f64>> {
    words
        .iter()
        .map(|w| {
            let w = w.as_ref();
            number(w).ok_or_else(|| Error::illegal(line, format!("`{}` is not a number", w)))
        })
        .collect()
}
