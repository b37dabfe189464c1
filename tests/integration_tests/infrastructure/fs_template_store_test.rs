use dosesense::application::ports::{PromptTemplateStore, TemplateError};
use dosesense::infrastructure::templates::FsTemplateStore;

#[tokio::test]
async fn given_template_file_when_loading_then_contents_are_returned() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("extract_info.txt"), "Extract:\n{{ input_text }}").unwrap();
    let store = FsTemplateStore::new(dir.path());

    let template = store.load("extract_info").await.unwrap();

    assert_eq!(template, "Extract:\n{{ input_text }}");
}

#[tokio::test]
async fn given_edited_template_when_loading_again_then_new_contents_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean_scraped.txt");
    std::fs::write(&path, "v1").unwrap();
    let store = FsTemplateStore::new(dir.path());
    assert_eq!(store.load("clean_scraped").await.unwrap(), "v1");

    std::fs::write(&path, "v2").unwrap();

    assert_eq!(store.load("clean_scraped").await.unwrap(), "v2");
}

#[tokio::test]
async fn given_missing_template_when_loading_then_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsTemplateStore::new(dir.path());

    let result = store.load("extract_info").await;

    assert!(matches!(result, Err(TemplateError::NotFound(name)) if name == "extract_info"));
}

#[tokio::test]
async fn given_path_traversal_name_when_loading_then_invalid_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsTemplateStore::new(dir.path());

    let result = store.load("../secrets").await;

    assert!(matches!(result, Err(TemplateError::InvalidName(_))));
}

#[tokio::test]
async fn given_shipped_prompts_directory_when_loading_then_both_templates_have_placeholder() {
    let store = FsTemplateStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts"));

    for name in ["extract_info", "clean_scraped"] {
        let template = store.load(name).await.unwrap();
        assert!(template.contains("{{ input_text }}"), "{name}");
    }
}
