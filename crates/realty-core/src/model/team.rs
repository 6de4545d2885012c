// ── Team member domain types ──

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use realty_api::{CreateBody, FilePart, MultipartPayload, Operations, Resource};

use super::{Draft, blank_fields};

/// Multipart field name the backend expects the photo under.
const IMAGE_FIELD: &str = "image";

/// A photo selected for upload with a new team member.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Read an image from disk, guessing the content type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            mime: mime_for(path),
            file_name,
            bytes: Bytes::from(bytes),
        })
    }

    fn into_part(self) -> FilePart {
        FilePart {
            field: IMAGE_FIELD.into(),
            file_name: self.file_name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

fn mime_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime.to_owned())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Job title shown on the site, e.g. "Senior Agent".
    pub role: String,
    pub bio: String,
    /// Photo URL as served by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Photo to send with a create. Never serialized.
    #[serde(skip)]
    pub upload: Option<ImageUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamMemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl TeamMember {
    fn multipart(&self) -> MultipartPayload {
        let payload = MultipartPayload::new()
            .text("name", &self.name)
            .text("email", &self.email)
            .text("phone", &self.phone)
            .text("role", &self.role)
            .text("bio", &self.bio);
        match self.upload.clone() {
            Some(upload) => payload.file(upload.into_part()),
            None => payload,
        }
    }
}

impl Resource for TeamMember {
    const NAME: &'static str = "team member";
    const PATH: &'static str = "team";
    const COLLECTION_KEY: &'static str = "team";
    const OPERATIONS: Operations = Operations {
        list: true,
        create: true,
        update: false,
        delete: true,
    };
    type Patch = TeamMemberPatch;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn apply_patch(&mut self, patch: &TeamMemberPatch) {
        let fields = [
            (&mut self.name, &patch.name),
            (&mut self.email, &patch.email),
            (&mut self.phone, &patch.phone),
            (&mut self.role, &patch.role),
            (&mut self.bio, &patch.bio),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                field.clone_from(v);
            }
        }
    }

    fn to_patch(&self) -> TeamMemberPatch {
        TeamMemberPatch {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            role: Some(self.role.clone()),
            bio: Some(self.bio.clone()),
        }
    }

    /// Always multipart: scalar fields plus the optional photo.
    fn create_body(&self) -> Result<CreateBody, serde_json::Error> {
        Ok(CreateBody::Multipart(self.multipart()))
    }
}

impl Draft for TeamMember {
    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("role", &self.role),
            ("bio", &self.bio),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn member() -> TeamMember {
        TeamMember {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            phone: "555-0100".into(),
            role: "Broker".into(),
            bio: "Twenty years in coastal property.".into(),
            ..TeamMember::default()
        }
    }

    #[test]
    fn create_body_is_multipart_with_optional_image() {
        let CreateBody::Multipart(payload) = member().create_body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.fields().len(), 5);
        assert!(payload.file_part().is_none());

        let mut with_photo = member();
        with_photo.upload = Some(ImageUpload {
            file_name: "grace.jpg".into(),
            mime: Some("image/jpeg".into()),
            bytes: Bytes::from_static(b"jpeg"),
        });
        let CreateBody::Multipart(payload) = with_photo.create_body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.file_part().unwrap().field, "image");
    }

    #[test]
    fn all_five_fields_required() {
        assert!(member().missing_fields().is_empty());
        assert_eq!(
            TeamMember::default().missing_fields(),
            vec!["name", "email", "phone", "role", "bio"]
        );
    }

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(mime_for(Path::new("a.PNG")).as_deref(), Some("image/png"));
        assert_eq!(mime_for(Path::new("a.bin")), None);
    }

    #[test]
    fn upload_never_serialized() {
        let mut m = member();
        m.upload = Some(ImageUpload {
            file_name: "x.png".into(),
            mime: None,
            bytes: Bytes::new(),
        });
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("upload").is_none());
    }
}
