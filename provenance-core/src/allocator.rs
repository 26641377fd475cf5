use std::collections::HashSet;

use snafu::ResultExt;
use tracing::{info, instrument, warn};

use crate::{
    AllocationError, HaulContext, MAX_HAUL_NUMBER, MAX_SEQUENCE, TraceabilityCode,
    TraceabilityStore,
    allocation_error::{
        AllocationExhaustedSnafu, CodeCountSnafu, InvalidHaulNumberSnafu, StoreSnafu,
    },
};

pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// Optimistic traceability code allocation.
///
/// The initial sequence is guessed from the number of codes the haul already
/// has, which races with concurrent writers. Every candidate is therefore
/// rechecked against the store, and a bounded number of sequences are tried
/// before giving up with [`AllocationError::AllocationExhausted`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceabilityCodeAllocator;

impl TraceabilityCodeAllocator {

    /// Allocates a code given the codes already assigned within the haul.
    #[instrument(skip_all, fields(haul_id = %context.haul_id))]
    pub async fn allocate<S>(
        &self,
        context: &HaulContext,
        existing_codes: &[TraceabilityCode],
        store: &S,
    ) -> Result<TraceabilityCode, AllocationError>
    where
        S: TraceabilityStore + ?Sized,
    {
        let existing: HashSet<&str> = existing_codes.iter().map(AsRef::as_ref).collect();
        let initial = existing_codes.len() as u32 + 1;

        self.allocate_from(context, initial, &existing, store).await
    }

    /// Allocates a code seeding the sequence from [`TraceabilityStore::existing_code_count`].
    #[instrument(skip_all, fields(haul_id = %context.haul_id))]
    pub async fn allocate_seeded<S>(
        &self,
        context: &HaulContext,
        store: &S,
    ) -> Result<TraceabilityCode, AllocationError>
    where
        S: TraceabilityStore + ?Sized,
    {
        let count = store
            .existing_code_count(&context.haul_id)
            .await
            .context(CodeCountSnafu {
                haul_id: context.haul_id,
            })?;

        self.allocate_from(context, count + 1, &HashSet::new(), store)
            .await
    }

    async fn allocate_from<S>(
        &self,
        context: &HaulContext,
        initial_sequence: u32,
        existing: &HashSet<&str>,
        store: &S,
    ) -> Result<TraceabilityCode, AllocationError>
    where
        S: TraceabilityStore + ?Sized,
    {
        if context.haul_number > MAX_HAUL_NUMBER {
            return InvalidHaulNumberSnafu {
                haul_number: context.haul_number,
            }
            .fail();
        }

        let prefix = context.code_prefix();
        let mut sequence = initial_sequence.max(1);
        let mut attempts = 0;
        let mut last_candidate = None;

        while attempts < MAX_ALLOCATION_ATTEMPTS && sequence <= MAX_SEQUENCE {
            attempts += 1;
            let candidate = TraceabilityCode::compose(&prefix, sequence);
            last_candidate = Some(candidate.to_string());

            let taken = existing.contains(candidate.as_ref())
                || store
                    .record_exists_by_code(&context.haul_id, candidate.as_ref())
                    .await
                    .with_context(|_| StoreSnafu {
                        code: candidate.to_string(),
                    })?;

            if !taken {
                if attempts > 1 {
                    info!(%candidate, attempts, "allocated traceability code after collisions");
                }
                return Ok(candidate);
            }

            warn!(%candidate, attempts, "traceability code already in use");
            sequence += 1;
        }

        AllocationExhaustedSnafu {
            haul_id: context.haul_id,
            attempts,
            last_candidate,
        }
        .fail()
    }
}
