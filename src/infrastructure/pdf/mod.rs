mod lopdf_splitter;

pub use lopdf_splitter::LopdfSplitter;
