use crate::assets::registry::{GeometryHandle, MaterialHandle};

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Procedural geometry primitive. Dimensions are in local units, before
/// the entity's world transform is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere { radius: f32 },
    /// Cylinder along the local Y axis, centered on the origin.
    Cylinder { radius: f32, height: f32 },
    /// Flat torus in the local XZ plane.
    Torus { radius: f32, tube: f32 },
    /// Flat annulus in the local XZ plane.
    Ring { inner: f32, outer: f32 },
    /// Point sprite cloud; rendered as one instance per point.
    Points { size: f32 },
}

impl Geometry {
    /// Geometry type tag written to the instance buffer.
    pub fn kind(&self) -> f32 {
        match self {
            Geometry::Sphere { .. } => 0.0,
            Geometry::Cylinder { .. } => 1.0,
            Geometry::Torus { .. } => 2.0,
            Geometry::Ring { .. } => 3.0,
            Geometry::Points { .. } => 4.0,
        }
    }

    /// The two shape parameters written to the instance buffer.
    pub fn params(&self) -> [f32; 2] {
        match *self {
            Geometry::Sphere { radius } => [radius, 0.0],
            Geometry::Cylinder { radius, height } => [radius, height],
            Geometry::Torus { radius, tube } => [radius, tube],
            Geometry::Ring { inner, outer } => [inner, outer],
            Geometry::Points { size } => [size, 0.0],
        }
    }

    /// Radius of a sphere around the local origin that encloses the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Geometry::Sphere { radius } => radius,
            Geometry::Cylinder { radius, height } => (radius * radius + height * height * 0.25).sqrt(),
            Geometry::Torus { radius, tube } => radius + tube,
            Geometry::Ring { outer, .. } => outer,
            Geometry::Points { size } => size * 0.5,
        }
    }
}

/// Surface description. Materials without an emissive channel (unlit
/// "basic" materials) cannot be highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Self-illumination. `None` for materials that do not support it.
    pub emissive: Option<Color>,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// 1.0 = opaque.
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::default(),
            emissive: Some(Color::BLACK),
            shininess: 32.0,
            opacity: 1.0,
        }
    }
}

impl Material {
    /// Lit material with a black emissive channel.
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Unlit material with no emissive channel.
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            emissive: None,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = Some(emissive);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn supports_emissive(&self) -> bool {
        self.emissive.is_some()
    }
}

/// Renderable mesh attached to an entity. Geometry and material are
/// tracked in the resource pool through their handles so a scene rebuild
/// can dispose them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
    pub geometry_handle: GeometryHandle,
    pub material_handle: MaterialHandle,
}
