#[cfg(test)]
mod common;

#[cfg(test)]
mod generator_invariant_tests;

#[cfg(test)]
mod generator_criminal_tests;

#[cfg(test)]
mod generator_bounds_tests;

#[cfg(test)]
mod attach_detail_tests;

#[cfg(test)]
mod delete_semantics_tests;

#[cfg(test)]
mod export_tests;

#[cfg(test)]
mod batch_tests;

#[cfg(test)]
mod stats_tests;
