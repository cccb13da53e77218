use std::io::{self, BufRead};

/// Splits a text stream into whitespace-delimited tokens, one line at a time,
/// keeping track of the line each token came from.
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    line: String,
    pos: usize,
    line_number: usize,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
            line_number: 0,
        }
    }

    /// 1-based number of the line the last token was read from; 0 before the
    /// first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> io::Result<Option<&str>> {
        loop {
            let rest = &self.line[self.pos..];
            let skipped = rest.len() - rest.trim_start().len();
            self.pos += skipped;
            if self.pos < self.line.len() {
                break;
            }
            if !self.read_line()? {
                return Ok(None);
            }
        }

        let start = self.pos;
        let rest = &self.line[start..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos = start + len;
        Ok(Some(&self.line[start..start + len]))
    }

    /// Consumes whatever is left on the current line and returns it trimmed.
    /// Never reads past the end of the current line.
    pub fn rest_of_line(&mut self) -> &str {
        let rest = self.line[self.pos..].trim();
        self.pos = self.line.len();
        rest
    }

    fn read_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        self.pos = 0;
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(String, usize)> {
        let mut tkn = Tokenizer::new(input.as_bytes());
        let mut out = Vec::new();
        while let Some(tok) = tkn.next_token().unwrap() {
            let tok = tok.to_owned();
            out.push((tok, tkn.line_number()));
        }
        out
    }

    #[test]
    fn tokens_with_lines() {
        let toks = collect("solid  a\n\n\t facet normal 0 1e-3 -2\r\n  endsolid");
        let words = toks.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>();
        assert_eq!(words, vec!["solid", "a", "facet", "normal", "0", "1e-3", "-2", "endsolid"]);
        assert_eq!(toks[1].1, 1);
        assert_eq!(toks[2].1, 3);
        assert_eq!(toks[7].1, 4);
    }

    #[test]
    fn empty_input() {
        assert!(collect("").is_empty());
        assert!(collect(" \n\n  \t\n").is_empty());
    }

    #[test]
    fn rest_of_line_stays_on_line() {
        let mut tkn = Tokenizer::new("solid my part \nfacet".as_bytes());
        assert_eq!(tkn.next_token().unwrap(), Some("solid"));
        assert_eq!(tkn.rest_of_line(), "my part");
        assert_eq!(tkn.next_token().unwrap(), Some("facet"));
        assert_eq!(tkn.rest_of_line(), "");
        assert_eq!(tkn.next_token().unwrap(), None);
    }
}
