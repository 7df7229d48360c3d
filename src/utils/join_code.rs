//! 班级邀请码
//!
//! - 规范形式：6 位大写字母或数字，无分隔符，如 `A79BC3`，数据库中按此形式保存
//! - 展示形式：每两位一组用连字符连接，如 `A7-9B-C3`
//!
//! 用户输入不区分大小写，也可以带分隔符，查询前统一经过 [`normalize`]。

use std::future::Future;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::{debug, warn};

use crate::errors::{ClassroomError, Result};

/// 邀请码长度（规范形式）
pub const CODE_LENGTH: usize = 6;

/// 邀请码字符集：A-Z 与 0-9，共 36 个字符
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 默认最大尝试次数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

const SEPARATOR: &str = "-";
const GROUP_SIZE: usize = 2;

static CANONICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{6}$").expect("Invalid join code regex"));

/// 转换为规范形式：只保留 ASCII 字母和数字并转为大写
///
/// 对任意输入都有定义，长度由调用方校验。
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// 转换为展示形式：`A79BC3` -> `A7-9B-C3`
///
/// 长度不是 6 时原样返回。
pub fn format(canonical: &str) -> String {
    let chars: Vec<char> = canonical.chars().collect();
    if chars.len() != CODE_LENGTH {
        return canonical.to_string();
    }
    chars
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// 是否为合法的规范形式
pub fn is_canonical(code: &str) -> bool {
    CANONICAL_RE.is_match(code)
}

/// 随机抽取一个规范形式的候选码
fn draw_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// 邀请码生成器
///
/// 每次抽取一个候选码后立即查询存储层是否已被占用，直到找到空闲的码或用完尝试次数。
/// 查询与插入之间不是原子的，并发创建时仍可能冲突，由唯一索引兜底。
#[derive(Debug, Clone, Copy)]
pub struct JoinCodeGenerator {
    max_attempts: u32,
}

impl Default for JoinCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl JoinCodeGenerator {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 生成一个未被占用的邀请码（规范形式）
    ///
    /// `exists` 接收规范形式的候选码，返回存储层中是否已有相同的码（不区分大小写）。
    /// 查询出错时立即返回该错误；尝试次数用完返回 `CodeSpaceExhausted`。
    pub async fn generate<F, Fut>(&self, mut exists: F) -> Result<String>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        for attempt in 1..=self.max_attempts {
            // rng 不能跨 await 持有
            let candidate = draw_code();
            let shown = format(&candidate);

            if !exists(normalize(&shown)).await? {
                debug!("Join code {} allocated after {} attempt(s)", shown, attempt);
                return Ok(candidate);
            }

            debug!("Join code {} already taken (attempt {})", shown, attempt);
        }

        warn!(
            "Join code generation exhausted after {} attempts",
            self.max_attempts
        );
        Err(ClassroomError::code_space_exhausted(format!(
            "Unable to generate a unique join code after {} attempts. Please try again.",
            self.max_attempts
        )))
    }
}
