use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    // 获取项目根目录
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        eprintln!("Warning: frontend/dist/index.html not found, writing a minimal upload form");
        create_fallback_files(&dist_path);
    }
}

fn create_fallback_files(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create dist directory");

    // 与正式页面使用相同的占位符
    let fallback_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>%SYSTEM_NAME%</title>
</head>
<body>
    <h1>%SYSTEM_NAME%</h1>
    <form method="post" action="/" enctype="multipart/form-data">
        <input name="file" type="file">
        <input name="documentType" type="text" placeholder="invoice" value="%DOCUMENT_TYPE%">
        <button type="submit">Submit</button>
    </form>
    %RESULT%
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), fallback_html)
        .expect("Failed to write fallback index.html");
}
