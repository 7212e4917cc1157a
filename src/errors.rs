use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmartlinkError {
    Validation(String),
    MalformedInput(String),
    NotFound(String),
    AlreadyExists(String),
    FileOperation(String),
    Serialization(String),
    IdExhausted(String),
    Lockfile(String),
    Config(String),
}

impl SmartlinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SmartlinkError::Validation(_) => "E001",
            SmartlinkError::MalformedInput(_) => "E002",
            SmartlinkError::NotFound(_) => "E003",
            SmartlinkError::FileOperation(_) => "E004",
            SmartlinkError::Serialization(_) => "E005",
            SmartlinkError::IdExhausted(_) => "E006",
            SmartlinkError::Lockfile(_) => "E007",
            SmartlinkError::Config(_) => "E008",
            SmartlinkError::AlreadyExists(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SmartlinkError::Validation(_) => "Validation Error",
            SmartlinkError::MalformedInput(_) => "Malformed Input",
            SmartlinkError::NotFound(_) => "Resource Not Found",
            SmartlinkError::FileOperation(_) => "File Operation Error",
            SmartlinkError::Serialization(_) => "Serialization Error",
            SmartlinkError::IdExhausted(_) => "Link ID Space Exhausted",
            SmartlinkError::Lockfile(_) => "Lockfile Error",
            SmartlinkError::Config(_) => "Configuration Error",
            SmartlinkError::AlreadyExists(_) => "Link Already Exists",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SmartlinkError::Validation(msg)
            | SmartlinkError::MalformedInput(msg)
            | SmartlinkError::NotFound(msg)
            | SmartlinkError::AlreadyExists(msg)
            | SmartlinkError::FileOperation(msg)
            | SmartlinkError::Serialization(msg)
            | SmartlinkError::IdExhausted(msg)
            | SmartlinkError::Lockfile(msg)
            | SmartlinkError::Config(msg) => msg,
        }
    }

    /// HTTP status the edge answers with for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SmartlinkError::Validation(_) | SmartlinkError::MalformedInput(_) => {
                StatusCode::BAD_REQUEST
            }
            SmartlinkError::NotFound(_) => StatusCode::NOT_FOUND,
            SmartlinkError::AlreadyExists(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Rejections caused by the caller, as opposed to storage or runtime faults.
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SmartlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SmartlinkError {}

// 便捷的构造函数
impl SmartlinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Validation(msg.into())
    }

    pub fn malformed_input<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::MalformedInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::NotFound(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::AlreadyExists(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Serialization(msg.into())
    }

    pub fn id_exhausted<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::IdExhausted(msg.into())
    }

    pub fn lockfile<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Lockfile(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Config(msg.into())
    }
}

impl From<std::io::Error> for SmartlinkError {
    fn from(err: std::io::Error) -> Self {
        SmartlinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SmartlinkError {
    fn from(err: serde_json::Error) -> Self {
        SmartlinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SmartlinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SmartlinkError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SmartlinkError::malformed_input("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SmartlinkError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SmartlinkError::file_operation("disk full").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!SmartlinkError::id_exhausted("x").is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SmartlinkError = io.into();
        assert_eq!(err.code(), "E004");
        assert!(err.format_simple().starts_with("File Operation Error: "));
    }
}
