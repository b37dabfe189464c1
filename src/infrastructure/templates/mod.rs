mod fs_template_store;

pub use fs_template_store::FsTemplateStore;
