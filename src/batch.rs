use rayon::prelude::*;

use crate::{AlignedPair, Aligner, AlignerParameters, Result};

/// Aligns many independent pairs on one worker pool.
///
/// Every pair gets its own context and grid; pairs run concurrently and
/// each pair's wavefront reuses the same pool for its diagonals.
pub struct BatchAligner {
    aligner: Aligner,
}

impl BatchAligner {
    pub fn new(params: AlignerParameters) -> Result<Self> {
        Ok(Self {
            aligner: Aligner::new(params)?,
        })
    }

    pub fn from_aligner(aligner: Aligner) -> Self {
        Self { aligner }
    }

    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    /// Results come back in input order; one failing pair does not stop the others.
    pub fn align_all<Q, S>(&self, pairs: &[(Q, S)]) -> Vec<Result<AlignedPair>>
    where
        Q: AsRef<[u8]> + Sync,
        S: AsRef<[u8]> + Sync,
    {
        let aligner = &self.aligner;
        let results: Vec<_> = aligner.pool().install(|| {
            pairs
                .par_iter()
                .map(|(query, subject)| aligner.align(query.as_ref(), subject.as_ref()))
                .collect()
        });

        let failed = results.iter().filter(|r| r.is_err()).count();
        log::info!(
            "aligned {} pairs on {} threads ({} failed)",
            pairs.len(),
            aligner.threads(),
            failed
        );
        results
    }
}
