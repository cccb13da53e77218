use crate::core::corner_table::{self, CornerTable};
use crate::core::material::Material;

/// Root of a scene: an ordered list of top-level nodes and the URL the scene
/// was loaded from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
    url: String,
    children: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding one shape with a default material and `ifs` as its
    /// geometry; the layout the mesh readers produce.
    pub fn from_face_set(ifs: IndexedFaceSet) -> Self {
        let mut appearance = Appearance::new();
        appearance.set_material(Material::new());
        let mut shape = Shape::new();
        shape.set_appearance(appearance);
        shape.set_geometry(ifs);

        let mut wrl = Self::new();
        wrl.add_child(shape);
        wrl
    }

    /// Removes every node and resets the URL.
    pub fn clear(&mut self) {
        self.url.clear();
        self.children.clear();
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_owned();
    }

    pub fn add_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn get_children(&self) -> &[Node] {
        &self.children
    }

    pub fn get_child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn get_child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}


#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Group),
    Shape(Shape),
}

impl Node {
    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Node::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Node::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Group(_) => "Group",
            Node::Shape(_) => "Shape",
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Shape> for Node {
    fn from(shape: Shape) -> Self {
        Node::Shape(shape)
    }
}


/// A named collection of child nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    name: String,
    children: Vec<Node>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), children: Vec::new() }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn add_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn get_children(&self) -> &[Node] {
        &self.children
    }
}


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    appearance: Option<Appearance>,
    geometry: Option<Geometry>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = Some(appearance);
    }

    pub fn get_geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn get_geometry_mut(&mut self) -> Option<&mut Geometry> {
        self.geometry.as_mut()
    }

    pub fn set_geometry(&mut self, geometry: impl Into<Geometry>) {
        self.geometry = Some(geometry.into());
    }
}


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
    material: Option<Material>,
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }
}


#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    IndexedFaceSet(IndexedFaceSet),
    IndexedLineSet(IndexedLineSet),
}

impl Geometry {
    pub fn as_indexed_face_set(&self) -> Option<&IndexedFaceSet> {
        match self {
            Geometry::IndexedFaceSet(ifs) => Some(ifs),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::IndexedFaceSet(_) => "IndexedFaceSet",
            Geometry::IndexedLineSet(_) => "IndexedLineSet",
        }
    }
}

impl From<IndexedFaceSet> for Geometry {
    fn from(ifs: IndexedFaceSet) -> Self {
        Geometry::IndexedFaceSet(ifs)
    }
}

impl From<IndexedLineSet> for Geometry {
    fn from(ils: IndexedLineSet) -> Self {
        Geometry::IndexedLineSet(ils)
    }
}


/// Polygon mesh stored as flat arrays.
///
/// `coord` holds three floats per vertex and `coord_index` one run of vertex
/// indices per face, each run terminated by `-1`. `normal` holds three floats
/// per face or per vertex, depending on `normal_per_vertex`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedFaceSet {
    name: String,
    coord: Vec<f32>,
    coord_index: Vec<i32>,
    normal: Vec<f32>,
    normal_per_vertex: bool,
}

impl IndexedFaceSet {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            coord: Vec::new(),
            coord_index: Vec::new(),
            normal: Vec::new(),
            normal_per_vertex: true,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn get_coord(&self) -> &[f32] {
        &self.coord
    }

    pub fn get_coord_mut(&mut self) -> &mut Vec<f32> {
        &mut self.coord
    }

    pub fn get_coord_index(&self) -> &[i32] {
        &self.coord_index
    }

    pub fn get_coord_index_mut(&mut self) -> &mut Vec<i32> {
        &mut self.coord_index
    }

    pub fn get_normal(&self) -> &[f32] {
        &self.normal
    }

    pub fn get_normal_mut(&mut self) -> &mut Vec<f32> {
        &mut self.normal
    }

    pub fn get_normal_per_vertex(&self) -> bool {
        self.normal_per_vertex
    }

    pub fn set_normal_per_vertex(&mut self, value: bool) {
        self.normal_per_vertex = value;
    }

    /// Number of whole `xyz` triples in `coord`.
    pub fn num_vertices(&self) -> usize {
        self.coord.len() / 3
    }

    pub fn vertex(&self, index: usize) -> Option<[f32; 3]> {
        triple(&self.coord, index)
    }

    pub fn normal(&self, index: usize) -> Option<[f32; 3]> {
        triple(&self.normal, index)
    }

    /// Builds the corner table of this face set.
    pub fn corner_table(&self) -> Result<CornerTable, corner_table::Err> {
        CornerTable::from_coord_index(self.num_vertices(), &self.coord_index)
    }
}

impl Default for IndexedFaceSet {
    fn default() -> Self {
        Self::new()
    }
}


/// Polylines stored as flat arrays; `coord_index` uses the same `-1`
/// separated layout as [`IndexedFaceSet`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedLineSet {
    coord: Vec<f32>,
    coord_index: Vec<i32>,
}

impl IndexedLineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_coord_mut(&mut self) -> &mut Vec<f32> {
        &mut self.coord
    }

    pub fn get_coord_index_mut(&mut self) -> &mut Vec<i32> {
        &mut self.coord_index
    }
}


fn triple(data: &[f32], index: usize) -> Option<[f32; 3]> {
    let s = data.get(3 * index..3 * index + 3)?;
    Some([s[0], s[1], s[2]])
}
