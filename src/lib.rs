//! BillGo Upload Forwarder - 文档上传转发前端
//!
//! 基于 Actix Web 构建：接收浏览器表单上传的文件，编码为 base64 后包装成 JSON 信封，
//! 同步 POST 到配置的上游接口，并把上游的原始响应显示在表单页面上。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 可选身份解析中间件
//! - `models`: 数据模型定义
//! - `routes`: 表单页面与 API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 转发逻辑
//! - `upstream`: 上游 HTTP 客户端抽象
//! - `utils`: 工具函数（演示 token、URL、HTML 转义）

pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod upstream;
pub mod utils;
