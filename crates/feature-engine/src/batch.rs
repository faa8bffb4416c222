//! Batch Feature Extraction

use crate::config::{FailurePolicy, FeatureConfig};
use crate::error::FeatureError;
use crate::features::{FeatureExtractor, FeatureVector};
use tracing::{debug, info, warn};
use trajectory::TrajectoryRecord;

impl FeatureExtractor {
    /// Extract one vector per record, in input order
    ///
    /// Each vector carries the index of the record it came from. Under
    /// [`FailurePolicy::Skip`] failing records are logged and left out.
    pub fn extract_batch(
        &self,
        records: &[TrajectoryRecord],
    ) -> Result<Vec<FeatureVector>, FeatureError> {
        self.config().validate()?;

        let mut vectors = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for (index, record) in records.iter().enumerate() {
            let result = record
                .trajectory(self.config().layout)
                .map_err(FeatureError::from)
                .and_then(|traj| self.extract(&traj));

            match result {
                Ok(mut vector) => {
                    vector.record_index = Some(index);
                    vectors.push(vector);
                }
                Err(err) => match self.config().failure_policy {
                    FailurePolicy::Abort => {
                        return Err(FeatureError::Record {
                            index,
                            source: Box::new(err),
                        });
                    }
                    FailurePolicy::Skip => {
                        warn!("Skipping record {}: {}", index, err);
                        skipped += 1;
                    }
                },
            }
        }

        info!(
            "Built {} feature vectors from {} records ({} skipped)",
            vectors.len(),
            records.len(),
            skipped
        );
        debug!("Feature vectors: {:?}", vectors);
        if let Some(first) = vectors.first() {
            debug!("First feature vector: {:?}", first.values);
        }

        Ok(vectors)
    }
}

/// Feature vectors of every record's trajectory, in input order
pub fn build_batch(
    records: &[TrajectoryRecord],
    config: &FeatureConfig,
) -> Result<Vec<FeatureVector>, FeatureError> {
    FeatureExtractor::new(config.clone()).extract_batch(records)
}
