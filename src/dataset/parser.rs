//! Line parser for whitespace-delimited rule records.

use crate::classifier::Rule;
use crate::error::{Result, RulevoError};

/// Parses one line into a rule, or `None` for a blank line.
///
/// Accepted forms, for a condition length `L`:
///
/// - `L + 1` numeric tokens: the condition values then the output;
/// - two tokens where the first is exactly `L` characters of `0`/`1`: a
///   packed binary condition then the output (`"01101 1"`).
///
/// The output must be 0 or 1. Non-finite values are rejected.
pub(crate) fn parse_line(
    line_no: usize,
    line: &str,
    condition_length: usize,
) -> Result<Option<Rule>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    let packed = tokens.len() == 2
        && condition_length > 1
        && is_packed_bits(tokens[0], condition_length);
    let condition = if packed {
        tokens[0]
            .chars()
            .map(|c| if c == '1' { 1.0 } else { 0.0 })
            .collect()
    } else if tokens.len() == condition_length + 1 {
        tokens[..condition_length]
            .iter()
            .enumerate()
            .map(|(i, tok)| parse_value(line_no, i + 1, tok))
            .collect::<Result<Vec<f64>>>()?
    } else {
        return Err(RulevoError::data_format(
            line_no,
            format!(
                "expected {} values ({condition_length} condition + 1 output), found {}",
                condition_length + 1,
                tokens.len()
            ),
        ));
    };

    let output_token = tokens[tokens.len() - 1];
    let output = parse_value(line_no, tokens.len(), output_token)?;
    let output = if output == 0.0 {
        0
    } else if output == 1.0 {
        1
    } else {
        return Err(RulevoError::data_format(
            line_no,
            format!("output must be 0 or 1, found {output_token:?}"),
        ));
    };

    Ok(Some(Rule::new(condition, output)))
}

fn is_packed_bits(token: &str, condition_length: usize) -> bool {
    token.len() == condition_length && token.bytes().all(|b| b == b'0' || b == b'1')
}

fn parse_value(line_no: usize, column: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RulevoError::data_format(
            line_no,
            format!("token {column} ({token:?}) is not a finite number"),
        )),
    }
}
