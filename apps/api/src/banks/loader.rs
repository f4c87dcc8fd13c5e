//! CSV loading for both question banks.
//!
//! Rows are deserialized with `csv` + `serde`, validated, and given a
//! `QuestionId` exactly once. An `id` column wins when present; otherwise the
//! zero-based row position at load time becomes the id.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{CommunicationQuestion, LevelTag, QuestionId, TechnicalQuestion};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to open bank file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bank CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: complexity_score must be a finite number, got {value}")]
    InvalidComplexity { row: usize, value: f64 },

    #[error("row {row}: unknown level '{value}' (expected basic, medium or hard)")]
    UnknownLevel { row: usize, value: String },

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

#[derive(Debug, Deserialize)]
struct TechnicalRecord {
    #[serde(default)]
    id: Option<u32>,
    technology: String,
    complexity_score: f64,
    question_text: String,
    expected_answer: String,
    bloom_label: String,
}

#[derive(Debug, Deserialize)]
struct CommunicationRecord {
    #[serde(default)]
    id: Option<u32>,
    #[serde(rename = "Level")]
    level: String,
    #[serde(rename = "Question")]
    question: String,
}

fn open(path: &Path) -> Result<File, BankError> {
    File::open(path).map_err(|source| BankError::Open {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_technical_questions(path: &Path) -> Result<Vec<TechnicalQuestion>, BankError> {
    let questions = read_technical_questions(open(path)?)?;
    info!(
        "Loaded {} technical questions from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

pub fn load_communication_questions(path: &Path) -> Result<Vec<CommunicationQuestion>, BankError> {
    let questions = read_communication_questions(open(path)?)?;
    info!(
        "Loaded {} communication questions from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

pub fn read_technical_questions<R: Read>(reader: R) -> Result<Vec<TechnicalQuestion>, BankError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut ids = HashSet::new();
    let mut questions = Vec::new();

    for (row, record) in csv_reader.deserialize::<TechnicalRecord>().enumerate() {
        let record = record?;
        if !record.complexity_score.is_finite() {
            return Err(BankError::InvalidComplexity {
                row,
                value: record.complexity_score,
            });
        }
        let id = assign_id(&mut ids, record.id, row)?;
        questions.push(TechnicalQuestion {
            id,
            text: record.question_text,
            expected_answer: record.expected_answer,
            complexity_score: record.complexity_score,
            technology: record.technology,
            bloom_label: record.bloom_label,
        });
    }

    Ok(questions)
}

pub fn read_communication_questions<R: Read>(
    reader: R,
) -> Result<Vec<CommunicationQuestion>, BankError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut ids = HashSet::new();
    let mut questions = Vec::new();

    for (row, record) in csv_reader.deserialize::<CommunicationRecord>().enumerate() {
        let record = record?;
        let level: LevelTag = record.level.parse().map_err(|_| BankError::UnknownLevel {
            row,
            value: record.level.clone(),
        })?;
        let id = assign_id(&mut ids, record.id, row)?;
        questions.push(CommunicationQuestion {
            id,
            level,
            text: record.question,
        });
    }

    Ok(questions)
}

fn assign_id(
    seen: &mut HashSet<QuestionId>,
    explicit: Option<u32>,
    row: usize,
) -> Result<QuestionId, BankError> {
    let id = QuestionId(explicit.unwrap_or(row as u32));
    if !seen.insert(id) {
        return Err(BankError::DuplicateId(id));
    }
    Ok(id)
}
