//! SQL statement splitting behind an injectable trait.
//!
//! Boundary detection is lexical: the script is tokenized with `sqlparser`
//! and split on top-level semicolons, so statements execute exactly as
//! written and a script never has to parse against any particular statement
//! grammar. `BEGIN ... END` blocks (trigger bodies) and `CASE` expressions
//! keep their inner semicolons. Any other SQL-aware tokenizer can be
//! substituted by implementing `StatementSplitter`.

use anyhow::{Context, Result};
use sqlparser::{
    dialect::SQLiteDialect,
    keywords::Keyword,
    tokenizer::{Token, Tokenizer},
};

/// Splits a script's full text into an ordered sequence of trimmed,
/// individually executable statements. Empty and comment-only fragments are
/// discarded.
pub trait StatementSplitter {
    fn split(&self, sql: &str) -> Result<Vec<String>>;
}

/// Default splitter backed by the `sqlparser` tokenizer.
#[derive(Debug, Default)]
pub struct SqlParserSplitter;

impl StatementSplitter for SqlParserSplitter {
    fn split(&self, sql: &str) -> Result<Vec<String>> {
        let dialect = SQLiteDialect {};
        let tokens = Tokenizer::new(&dialect, sql)
            .tokenize()
            .context("Tokenizing SQL script")?;

        let mut statements = Vec::new();
        let mut current = String::new();
        let mut has_content = false;
        let mut depth = 0usize;

        for (idx, token) in tokens.iter().enumerate() {
            if depth == 0 && matches!(token, Token::SemiColon) {
                flush(&mut current, &mut has_content, &mut statements);
                continue;
            }
            if let Token::Word(word) = token {
                match word.keyword {
                    Keyword::BEGIN if opens_block(&tokens[idx + 1..]) => depth += 1,
                    Keyword::CASE => depth += 1,
                    Keyword::END => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
            if !matches!(token, Token::Whitespace(_)) {
                has_content = true;
            }
            current.push_str(&token.to_string());
        }
        flush(&mut current, &mut has_content, &mut statements);
        Ok(statements)
    }
}

fn flush(current: &mut String, has_content: &mut bool, statements: &mut Vec<String>) {
    let statement = current.trim().to_string();
    if *has_content && !statement.is_empty() {
        statements.push(statement);
    }
    current.clear();
    *has_content = false;
}

/// `BEGIN` opens a statement block unless it starts a transaction:
/// `BEGIN;`, `BEGIN TRANSACTION`, `BEGIN DEFERRED|IMMEDIATE|EXCLUSIVE|WORK`.
fn opens_block(rest: &[Token]) -> bool {
    for token in rest {
        match token {
            Token::Whitespace(_) => continue,
            Token::SemiColon => return false,
            Token::Word(word) => {
                return !matches!(
                    word.keyword,
                    Keyword::TRANSACTION
                        | Keyword::WORK
                        | Keyword::DEFERRED
                        | Keyword::IMMEDIATE
                        | Keyword::EXCLUSIVE
                );
            }
            _ => return true,
        }
    }
    false
}
