use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::errors::{ForwarderError, Result};
use crate::models::upload::requests::UploadForm;

/// 表单中文件字段名
pub const FILE_FIELD: &str = "file";
/// 表单中文档类型字段名
pub const DOCUMENT_TYPE_FIELD: &str = "documentType";

/// 读取结果：出错时 `form` 保留已经读到的字段，页面据此回填
#[derive(Debug, Default)]
pub struct UploadIntake {
    pub form: UploadForm,
    pub error: Option<ForwarderError>,
}

impl UploadIntake {
    pub fn into_result(self) -> Result<UploadForm> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.form),
        }
    }
}

/// 读取上传表单，文件完整读入内存
///
/// `max_size` 为 0 时不限制大小。遇到第一个错误即停止读取。
pub async fn read_upload(mut payload: Multipart, max_size: usize) -> UploadIntake {
    let mut form = UploadForm::default();
    let error = read_fields(&mut payload, max_size, &mut form).await.err();
    UploadIntake { form, error }
}

async fn read_fields(payload: &mut Multipart, max_size: usize, form: &mut UploadForm) -> Result<()> {
    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILE_FIELD => {
                if form.payload.is_some() {
                    return Err(ForwarderError::upload_rejected(
                        "only one file can be uploaded at a time",
                    ));
                }

                form.file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk?;
                    // 校验大小
                    if max_size > 0 && data.len() + chunk.len() > max_size {
                        return Err(ForwarderError::upload_rejected(
                            "file exceeds the configured size limit",
                        ));
                    }
                    data.extend_from_slice(&chunk);
                }
                form.payload = Some(data);
            }
            DOCUMENT_TYPE_FIELD => {
                let data = read_to_end(&mut field).await?;
                form.document_type = Some(String::from_utf8_lossy(&data).into_owned());
            }
            _ => {
                // 忽略未知字段，但必须读完
                read_to_end(&mut field).await?;
            }
        }
    }

    Ok(())
}

async fn read_to_end(field: &mut Field) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        data.extend_from_slice(&chunk?);
    }
    Ok(data)
}
