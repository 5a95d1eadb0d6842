use serde::{Deserialize, Serialize};

/// Уникальный идентификатор сущности в сцене
pub type EntityId = String;

/// Трансформация сущности
///
/// `rotation` хранится в градусах (углы Эйлера XYZ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Трансформация с заданной позицией
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Режим редактора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Выбор объектов
    #[default]
    Select,
    /// Перемещение выделения
    Move,
    /// Вращение выделения
    Rotate,
    /// Масштабирование выделения
    Scale,
    /// Свободная камера (редактирование отключено)
    FreeCamera,
}

impl EditMode {
    /// Режимы, в которых мышь редактирует выделение
    pub fn is_edit(&self) -> bool {
        matches!(self, EditMode::Move | EditMode::Rotate | EditMode::Scale)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EditMode::Select => "Select",
            EditMode::Move => "Move",
            EditMode::Rotate => "Rotate",
            EditMode::Scale => "Scale",
            EditMode::FreeCamera => "Free camera",
        }
    }
}

/// Камеры сцены редактора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    /// Обычная камера (панорамирование WASD + колесо)
    Normal,
    /// Свободная камера, управляемая хостом
    Free,
}
