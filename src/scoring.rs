// src/scoring.rs

//! Scoring and ranking rules shared by the answer, score and ranking handlers.

use crate::models::{
    answer::{ParticipantScore, RankingEntry},
    question::Question,
};

/// Outcome of grading one submitted option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub is_correct: bool,
    pub points: i64,
}

/// Grades a submitted option against the question's correct option.
/// Only an exact match counts; points depend on the question's difficulty.
pub fn grade_answer(question: &Question, submitted_option: &str) -> Grade {
    let is_correct = submitted_option == question.correct_option;
    let points = if is_correct {
        question.difficulty.points()
    } else {
        0
    };
    Grade { is_correct, points }
}

/// Orders participants by total score (highest first), breaking ties by
/// ascending user id, and assigns 1-based positions.
pub fn rank_participants(mut scores: Vec<ParticipantScore>) -> Vec<RankingEntry> {
    scores.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    scores
        .into_iter()
        .enumerate()
        .map(|(idx, s)| RankingEntry {
            position: idx + 1,
            user_id: s.user_id,
            name: s.name,
            total_score: s.total_score,
        })
        .collect()
}
