use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// 站点记录：仪表盘中的一张卡片
/// - id: 创建时生成的不透明字符串，之后不可变
/// - name / link: 必填且非空
/// - description: 必填
/// - thumbnail_url: 可选缩略图地址，缺省时不写入 JSON
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub link: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// 创建/更新输入模型：不包含 id，由服务端生成
///
/// All fields are optional at the wire level so that a body missing `name`
/// deserializes fine and is rejected by [`SiteInput::validate`] instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Validated mutable fields of a [`Site`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteFields {
    pub name: String,
    pub link: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

impl SiteInput {
    pub fn new(name: impl Into<String>, link: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            link: Some(link.into()),
            description: Some(description.into()),
            thumbnail_url: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// 统一校验：name、link、description 必须存在且非空
    pub fn validate(self) -> Result<SiteFields, ModelError> {
        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let link = required(self.link, "link", &mut missing);
        let description = required(self.description, "description", &mut missing);
        if !missing.is_empty() {
            return Err(ModelError::MissingFields(missing));
        }

        Ok(SiteFields {
            name: name.unwrap_or_default(),
            link: link.unwrap_or_default(),
            description: description.unwrap_or_default(),
            thumbnail_url: self.thumbnail_url,
        })
    }
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

impl Site {
    /// Build a new record with a freshly generated identifier.
    pub fn create(fields: SiteFields) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), fields)
    }

    pub fn with_id(id: impl Into<String>, fields: SiteFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            link: fields.link,
            description: fields.description,
            thumbnail_url: fields.thumbnail_url,
        }
    }

    /// Replace every field except `id`.
    pub fn replace_fields(&mut self, fields: SiteFields) {
        self.name = fields.name;
        self.link = fields.link;
        self.description = fields.description;
        self.thumbnail_url = fields.thumbnail_url;
    }
}
