use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `CoderSpec` 是 Coder 的可移植自描述记录，用于跨进程重建等价的 Coder 实例。
///
/// # 设计背景（Why）
/// - 管道执行引擎会把 Coder 结构随作业计划运到远端工作进程，双方只共享"按名查表"的
///   重建协定，不共享代码加载协调；
/// - 采用带判别标签的递归记录：`@type` 标识 Coder 种类，`components` 承载嵌套 Coder
///   的描述，其余属性以扁平键值对附着（如包装器适配器的 `wrapperType`）。
///
/// # 逻辑解析（How）
/// - `new` 仅需标签；`with_component`/`with_attribute` 以链式构建补全；
/// - serde 序列化输出 `{"@type": .., "components": [..], ..attributes}` 形态的 JSON 对象，
///   `components` 为空时省略，保持叶子描述紧凑。
///
/// # 契约说明（What）
/// - **前置条件**：属性键不得使用保留键 `@type` 与 `components`；
/// - **后置条件**：`serde_json` 往返后与原记录逐字段相等（`PartialEq`）；
/// - 标签与属性键是跨进程契约，变更视为破坏性演进。
///
/// # 风险提示（Trade-offs）
/// - 属性值采用 `serde_json::Value`，换取跨语言可达性；强类型校验由各工厂在重建时执行。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoderSpec {
    #[serde(rename = "@type")]
    tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<CoderSpec>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

impl CoderSpec {
    /// 以判别标签创建空描述记录。
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            components: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// 追加一个嵌套 Coder 的描述。
    pub fn with_component(mut self, component: CoderSpec) -> Self {
        self.components.push(component);
        self
    }

    /// 以既有集合整体替换嵌套描述序列。
    pub fn with_components(mut self, components: Vec<CoderSpec>) -> Self {
        self.components = components;
        self
    }

    /// 附加一个标签特定属性。
    ///
    /// # 契约说明（What）
    /// - **前置条件**：`key` 不得为保留键 `@type` 或 `components`。
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// 获取判别标签。
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 获取嵌套 Coder 描述序列。
    pub fn components(&self) -> &[CoderSpec] {
        &self.components
    }

    /// 按键读取属性原始值。
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// 按键读取字符串属性；键缺失或值非字符串时返回 `None`。
    pub fn str_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}
