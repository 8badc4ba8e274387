//! Core-Domänentypen: Szenengraph, Geometrie, Strahlen, Punkte, Lichter, Kamera.

pub mod camera;
pub mod centroid;
pub mod geometry;
pub mod light;
pub mod point;
pub mod ray;
pub mod scene;

pub use camera::{Camera3D, OrbitControls};
pub use centroid::centroid;
pub use geometry::{box_geometry, Geometry, GeometryId, GeometryStore, MeshGeometry};
pub use light::{add_light_source, find_bulb, remove_light_source, LightSource, LIGHT_NAME};
pub use point::{create_point, CENTER_POINT_NAME, CONTROL_POINT_NAME, PLAYER_NAME};
pub use ray::{Aabb, Plane, Ray};
pub use scene::{ObjectId, ObjectKind, RayHit, Scene, SceneObject, ShadowMap, UserData};
