/// 班级名称最大长度（字符数）
pub const MAX_CLASS_NAME_LEN: usize = 100;

/// 资料标题最大长度（字符数）
pub const MAX_MATERIAL_TITLE_LEN: usize = 200;

pub fn validate_class_name(name: &str) -> Result<(), &'static str> {
    // 名称不能为空白
    if name.trim().is_empty() {
        return Err("Class name must not be empty");
    }
    if name.chars().count() > MAX_CLASS_NAME_LEN {
        return Err("Class name must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_material_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Material title must not be empty");
    }
    if title.chars().count() > MAX_MATERIAL_TITLE_LEN {
        return Err("Material title must be at most 200 characters");
    }
    Ok(())
}

pub fn validate_file_size(size: i64) -> Result<(), &'static str> {
    if size < 0 {
        return Err("File size must not be negative");
    }
    Ok(())
}
