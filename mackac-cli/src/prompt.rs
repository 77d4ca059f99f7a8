//! Line-oriented input parsing for the interactive game.
//!
//! Malformed input is re-prompted and never consumes a turn; only a closed
//! stdin aborts the game.

use std::io::BufRead;

use mackac_core::{ClaimDecl, Response};

/// Parse a claim announcement: `t`/`truth`, or a pair of faces like `65`, `6 5`, `6,5`.
pub fn parse_claim(line: &str) -> Result<ClaimDecl, String> {
    let s = line.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err("empty input".to_string());
    }
    if s == "t" || s == "truth" {
        return Ok(ClaimDecl::Truth);
    }

    let mut digits = Vec::new();
    for c in s.chars() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        match c.to_digit(10) {
            Some(d) => digits.push(d as u8),
            None => return Err(format!("unrecognized claim '{}'", line.trim())),
        }
    }
    if digits.len() != 2 {
        return Err("a claim is exactly two die faces, e.g. 65".to_string());
    }
    let (a, b) = (digits[0], digits[1]);
    if !(1..=6).contains(&a) || !(1..=6).contains(&b) {
        return Err("die faces must be between 1 and 6".to_string());
    }
    Ok(ClaimDecl::Declare(a, b))
}

/// Parse a trust/challenge decision.
pub fn parse_response(line: &str) -> Result<Response, String> {
    match line.trim().to_ascii_lowercase().as_str() {
        "t" | "trust" => Ok(Response::Trust),
        "c" | "challenge" => Ok(Response::Challenge),
        other => Err(format!(
            "unrecognized decision '{}', expected trust or challenge",
            other
        )),
    }
}

/// Prompt until a valid claim announcement is read.
pub fn prompt_claim(input: &mut impl BufRead) -> Result<ClaimDecl, String> {
    loop {
        println!("Announce your throw: 't' for the truth, or two faces to declare (e.g. 65):");
        match parse_claim(&read_line(input)?) {
            Ok(decl) => return Ok(decl),
            Err(msg) => println!("{}", msg),
        }
    }
}

/// Prompt until a valid trust/challenge decision is read.
pub fn prompt_response(input: &mut impl BufRead) -> Result<Response, String> {
    loop {
        println!("(t)rust or (c)hallenge?");
        match parse_response(&read_line(input)?) {
            Ok(response) => return Ok(response),
            Err(msg) => println!("{}", msg),
        }
    }
}

fn read_line(input: &mut impl BufRead) -> Result<String, String> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|e| format!("stdin read failed: {}", e))?;
    if n == 0 {
        return Err("input closed".to_string());
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn claim_accepts_truth_and_face_pairs() {
        assert_eq!(parse_claim("t"), Ok(ClaimDecl::Truth));
        assert_eq!(parse_claim(" TRUTH "), Ok(ClaimDecl::Truth));
        assert_eq!(parse_claim("65"), Ok(ClaimDecl::Declare(6, 5)));
        assert_eq!(parse_claim("6 5"), Ok(ClaimDecl::Declare(6, 5)));
        assert_eq!(parse_claim("2,1"), Ok(ClaimDecl::Declare(2, 1)));
    }

    #[test]
    fn claim_rejects_malformed_input() {
        assert!(parse_claim("").is_err());
        assert!(parse_claim("yes").is_err());
        assert!(parse_claim("6").is_err());
        assert!(parse_claim("123").is_err());
        assert!(parse_claim("07").is_err());
        assert!(parse_claim("70").is_err());
    }

    #[test]
    fn response_accepts_both_tokens_and_shorthands() {
        assert_eq!(parse_response("trust"), Ok(Response::Trust));
        assert_eq!(parse_response("T"), Ok(Response::Trust));
        assert_eq!(parse_response("challenge"), Ok(Response::Challenge));
        assert_eq!(parse_response(" c "), Ok(Response::Challenge));
        assert!(parse_response("maybe").is_err());
    }

    #[test]
    fn prompts_reread_until_valid() {
        let mut input = Cursor::new(b"99\nnope\n65\n".to_vec());
        assert_eq!(prompt_claim(&mut input), Ok(ClaimDecl::Declare(6, 5)));

        let mut input = Cursor::new(b"what\nc\n".to_vec());
        assert_eq!(prompt_response(&mut input), Ok(Response::Challenge));
    }

    #[test]
    fn closed_input_aborts() {
        let mut input = Cursor::new(Vec::new());
        assert!(prompt_claim(&mut input).is_err());
    }
}
