//! Piecewise functions over the offset axis.
//!
//! Pieces are appended in offset order and may overlap: a later piece
//! typically starts later but runs to the same upper bound as the pieces
//! before it. Evaluation picks the most recently appended piece whose
//! domain contains the query, so the latest change at or before an offset
//! is the one in effect there.

use sw_score::{in_domain, Domain, MAX_OFFSET, MIN_OFFSET};

use crate::error::{EngineError, Result};

/// Something that maps an offset to a value.
pub trait Evaluate {
    fn evaluate(&self, offset: f64) -> Result<f64>;
}

/// One entry of a piecewise function.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece<E> {
    pub domain: Domain,
    pub evaluator: E,
}

/// Ordered table of pieces.
///
/// Starts are non-decreasing, so lookup is a binary search for the last
/// piece starting at or before the query, followed by a backward walk past
/// any piece whose domain ends before it.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseFunction<E> {
    pieces: Vec<Piece<E>>,
}

impl<E: Evaluate> PiecewiseFunction<E> {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    /// One piece covering the whole offset axis.
    pub fn full(evaluator: E) -> Self {
        Self {
            pieces: vec![Piece {
                domain: Domain::FULL,
                evaluator,
            }],
        }
    }

    /// Append a piece. Its domain must lie in `[MIN_OFFSET, MAX_OFFSET]` and
    /// must not start before the previous piece.
    pub fn add_piece(&mut self, domain: Domain, evaluator: E) -> Result<()> {
        for bound in [domain.start, domain.end] {
            if !in_domain(bound) {
                return Err(domain_error(bound));
            }
        }
        if domain.end < domain.start {
            return Err(EngineError::Ordering {
                begin: domain.start,
                end: domain.end,
            });
        }
        if let Some(last) = self.pieces.last() {
            if domain.start < last.domain.start {
                return Err(EngineError::PieceOrder {
                    start: domain.start,
                    previous: last.domain.start,
                });
            }
        }
        self.pieces.push(Piece { domain, evaluator });
        Ok(())
    }

    /// Evaluate with the most recently added piece containing `offset`.
    pub fn evaluate_at(&self, offset: f64) -> Result<f64> {
        if !in_domain(offset) {
            return Err(domain_error(offset));
        }
        let candidates = self.pieces.partition_point(|p| p.domain.start <= offset);
        self.pieces[..candidates]
            .iter()
            .rev()
            .find(|p| p.domain.contains(offset))
            .ok_or_else(|| domain_error(offset))?
            .evaluator
            .evaluate(offset)
    }

    pub fn pieces(&self) -> &[Piece<E>] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl<E: Evaluate> Default for PiecewiseFunction<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn domain_error(offset: f64) -> EngineError {
    EngineError::Domain {
        offset,
        min: MIN_OFFSET,
        max: MAX_OFFSET,
    }
}
