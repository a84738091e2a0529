use crate::core::models::system::MolecularSystem;
use crate::engine::classifier::SecondaryStructureClassifier;
use crate::engine::config::DsspConfig;
use crate::engine::error::EngineError;
use crate::engine::frame::ProteinFrame;
use crate::engine::hbond::HydrogenBondModel;
use crate::engine::progress::ProgressReporter;
use crate::engine::state::SecondaryStructureMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

/// Assigns DSSP secondary structure to every residue of `system`.
///
/// Structures with more residues than the configured threshold collect hydrogen
/// bond candidates through a spatial index; smaller ones evaluate every residue pair.
#[instrument(skip_all, name = "assignment_workflow")]
pub fn run(
    system: &MolecularSystem,
    config: &DsspConfig,
    reporter: &ProgressReporter,
) -> Result<SecondaryStructureMap, EngineError> {
    config.validate()?;

    let frame = ProteinFrame::from_system(system);
    info!(
        residues = frame.len(),
        chains = frame.chains().len(),
        "Starting secondary structure assignment."
    );

    let model = reporter.phase("Hydrogen bonds", || {
        HydrogenBondModel::build(&frame, config, reporter)
    })?;

    let map = reporter.phase("Classification", || {
        SecondaryStructureClassifier::new(&frame, &model)
            .with_pi_preference(config.prefer_pi_helices)
            .classify()
    });

    info!(
        strategy = ?model.strategy(),
        ladders = map.ladders().len(),
        "Assignment complete."
    );
    Ok(map)
}

/// Runs [`run`] over independent structures, in parallel when the `parallel` feature is on.
///
/// Results keep the order of `systems`.
pub fn run_batch(
    systems: &[MolecularSystem],
    config: &DsspConfig,
) -> Vec<Result<SecondaryStructureMap, EngineError>> {
    #[cfg(not(feature = "parallel"))]
    let iterator = systems.iter();

    #[cfg(feature = "parallel")]
    let iterator = systems.par_iter();

    iterator
        .map(|system| run(system, config, &ProgressReporter::new()))
        .collect()
}
