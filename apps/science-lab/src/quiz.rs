//! Multiple-choice quiz.

use serde::Serialize;
use crate::catalog::QuizQuestion;
use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Outcome of one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub correct: bool,
    pub correct_index: usize,
    /// True once this was the last question.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub grade: &'static str,
}

/// Everything the host needs to draw the quiz card.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSnapshot<'a> {
    pub phase: QuizPhase,
    pub index: usize,
    pub total: usize,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<&'a QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<QuizResults>,
}

/// Grade message for a final score.
pub fn grade(score: usize, total: usize) -> &'static str {
    if total == 0 {
        return "No questions answered.";
    }
    let percent = score * 100 / total;
    if percent >= 80 {
        "Excellent work!"
    } else if percent >= 50 {
        "Good effort!"
    } else {
        "Keep studying!"
    }
}

pub struct Quiz {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    index: usize,
    score: usize,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            phase: QuizPhase::NotStarted,
            index: 0,
            score: 0,
        }
    }

    /// Begin (or restart) from the first question with a zero score.
    pub fn start(&mut self) {
        self.index = 0;
        self.score = 0;
        self.phase = if self.questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::InProgress
        };
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::InProgress => self.questions.get(self.index),
            _ => None,
        }
    }

    /// Score the selected option and move to the next question.
    ///
    /// Every error leaves the quiz exactly as it was.
    pub fn submit(&mut self, selection: Option<usize>) -> Result<Answer, QuizError> {
        let question = match self.phase {
            QuizPhase::NotStarted => return Err(QuizError::NotStarted),
            QuizPhase::Finished => return Err(QuizError::Finished),
            QuizPhase::InProgress => self.questions.get(self.index).ok_or(QuizError::Finished)?,
        };

        let selected = selection.ok_or(QuizError::NoSelection)?;
        if selected >= question.options.len() {
            return Err(QuizError::InvalidOption {
                index: selected,
                count: question.options.len(),
            });
        }

        let correct_index = question.correct_answer_index;
        let correct = selected == correct_index;
        if correct {
            self.score += 1;
        }
        self.index += 1;
        let finished = self.index >= self.questions.len();
        if finished {
            self.phase = QuizPhase::Finished;
        }

        Ok(Answer { correct, correct_index, finished })
    }

    pub fn results(&self) -> Option<QuizResults> {
        (self.phase == QuizPhase::Finished).then(|| QuizResults {
            score: self.score,
            total: self.total(),
            grade: grade(self.score, self.total()),
        })
    }

    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        QuizSnapshot {
            phase: self.phase,
            index: self.index,
            total: self.total(),
            score: self.score,
            question: self.current(),
            results: self.results(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn quiz() -> Quiz {
        Quiz::new(Catalog::load().unwrap().questions().to_vec())
    }

    fn answers(q: &Quiz) -> Vec<usize> {
        q.questions.iter().map(|q| q.correct_answer_index).collect()
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let mut q = quiz();
        q.start();
        for answer in answers(&q) {
            assert!(q.submit(Some(answer)).unwrap().correct);
        }
        assert_eq!(q.phase(), QuizPhase::Finished);
        let results = q.results().unwrap();
        assert_eq!((results.score, results.total), (5, 5));
        assert_eq!(results.grade, "Excellent work!");
    }

    #[test]
    fn no_selection_blocks_progress() {
        let mut q = quiz();
        q.start();
        assert_eq!(q.submit(None), Err(QuizError::NoSelection));
        assert_eq!(q.index(), 0);
        assert_eq!(q.score(), 0);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut q = quiz();
        q.start();
        assert_eq!(q.submit(Some(4)), Err(QuizError::InvalidOption { index: 4, count: 4 }));
        assert_eq!(q.index(), 0);
    }

    #[test]
    fn wrong_answers_advance_without_scoring() {
        let mut q = quiz();
        q.start();
        let correct = answers(&q)[0];
        let answer = q.submit(Some((correct + 1) % 4)).unwrap();
        assert!(!answer.correct);
        assert_eq!(answer.correct_index, correct);
        assert_eq!(q.index(), 1);
        assert_eq!(q.score(), 0);
    }

    #[test]
    fn submit_outside_a_run_is_rejected() {
        let mut q = quiz();
        assert_eq!(q.submit(Some(0)), Err(QuizError::NotStarted));
        q.start();
        for answer in answers(&q) {
            q.submit(Some(answer)).unwrap();
        }
        assert_eq!(q.submit(Some(0)), Err(QuizError::Finished));
        assert_eq!(q.score(), 5);
    }

    #[test]
    fn restart_resets_score() {
        let mut q = quiz();
        q.start();
        let first = answers(&q)[0];
        q.submit(Some(first)).unwrap();
        assert_eq!(q.score(), 1);
        q.start();
        assert_eq!((q.index(), q.score()), (0, 0));
        assert!(q.results().is_none());
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(grade(4, 5), "Excellent work!");
        assert_eq!(grade(3, 5), "Good effort!");
        assert_eq!(grade(1, 5), "Keep studying!");
    }

    #[test]
    fn snapshot_serializes_current_question() {
        let mut q = quiz();
        q.start();
        let json = serde_json::to_value(q.snapshot()).unwrap();
        assert_eq!(json["phase"], "in_progress");
        assert_eq!(json["question"]["options"].as_array().unwrap().len(), 4);
        assert!(json.get("results").is_none());
    }
}
