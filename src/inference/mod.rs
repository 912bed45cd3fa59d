/// Cell content scoring and the decision ladder
pub mod classifier;
/// Grid candidate evaluation and ranking
pub mod grid_search;
/// Whole-sheet analysis pass
pub mod pipeline;
/// Verdict tallies over classified cells
pub mod summary;
