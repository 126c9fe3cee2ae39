/// 表单中未提供文件名时使用的默认值（与上游保持一致）
pub const DEFAULT_FILE_NAME: &str = "uploaded.pdf";

/// 一次上传请求：文件内容 + 元数据，不做持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// 文件内容（完整读入内存）
    pub payload: Vec<u8>,
    /// 原始文件名
    pub file_name: String,
    /// 文档类型，空白时由转发器替换为默认值
    pub document_type: Option<String>,
}

impl UploadRequest {
    pub fn new(
        payload: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        document_type: Option<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            file_name: file_name.into(),
            document_type,
        }
    }
}

/// 解析后的上传表单
///
/// 即使没有文件也会保留用户填写的文档类型，用于重新渲染表单。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub payload: Option<Vec<u8>>,
    pub document_type: Option<String>,
}

impl UploadForm {
    /// 转换为上传请求；文件缺失或为空时返回 None
    pub fn to_request(&self) -> Option<UploadRequest> {
        let payload = self.payload.as_ref().filter(|p| !p.is_empty())?;
        let file_name = self
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME);

        Some(UploadRequest::new(
            payload.clone(),
            file_name,
            self.document_type.clone(),
        ))
    }
}
