use futures::executor::block_on;
use parkada_core::{
    resolve_profile_card, AvatarError, AvatarReader, AvatarState, FsAvatarReader,
    IdentityProvider, ProfileCard, ProfileDirectory, ProfileError, SessionUser, UserProfile,
};
use std::io::Write;
use std::path::Path;

struct FixedIdentity(Option<&'static str>);

impl IdentityProvider for FixedIdentity {
    fn current_user(&self) -> Option<SessionUser> {
        self.0.map(|uid| SessionUser {
            uid: uid.to_string(),
        })
    }
}

enum Directory {
    Found(UserProfile),
    Missing,
    Down,
}

impl ProfileDirectory for Directory {
    async fn fetch_profile(&self, _uid: &str) -> Result<Option<UserProfile>, ProfileError> {
        match self {
            Self::Found(profile) => Ok(Some(profile.clone())),
            Self::Missing => Ok(None),
            Self::Down => Err(ProfileError::new("permission denied")),
        }
    }
}

fn student(year_level: Option<&str>) -> UserProfile {
    UserProfile {
        email: "ana@campus.edu".to_string(),
        role: "Student".to_string(),
        year_level: year_level.map(str::to_string),
    }
}

#[test]
fn signed_in_student_gets_full_card() {
    let card = block_on(resolve_profile_card(
        &FixedIdentity(Some("uid-1")),
        &Directory::Found(student(Some("3rd Year"))),
    ));
    assert_eq!(card.email_line, "Email: ana@campus.edu");
    assert_eq!(card.role_line, "Role: Student");
    assert_eq!(card.year_line.as_deref(), Some("Year Level: 3rd Year"));
}

#[test]
fn signed_out_user_gets_guest_card() {
    let card = block_on(resolve_profile_card(
        &FixedIdentity(None),
        &Directory::Found(student(None)),
    ));
    assert_eq!(card, ProfileCard::guest());
    assert_eq!(card.email_line, "Email: Guest");
    assert_eq!(card.role_line, "Role: N/A");
    assert_eq!(card.year_line, None);
}

#[test]
fn missing_profile_and_backend_failure_fall_back_to_guest() {
    let missing = block_on(resolve_profile_card(
        &FixedIdentity(Some("uid-2")),
        &Directory::Missing,
    ));
    assert_eq!(missing, ProfileCard::guest());

    let down = block_on(resolve_profile_card(
        &FixedIdentity(Some("uid-3")),
        &Directory::Down,
    ));
    assert_eq!(down, ProfileCard::guest());
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

#[test]
fn upload_updates_both_avatars() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "me.png", &[0x89, b'P', b'N', b'G']);
    let mut avatar = AvatarState::default();

    block_on(avatar.upload(&FsAvatarReader::default(), &path)).unwrap();
    let large = avatar.large().unwrap();
    assert!(large.starts_with("data:image/png;base64,"));
    assert_eq!(avatar.small(), Some(large));
}

#[test]
fn failed_upload_keeps_previous_avatar() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "me.jpg", b"jpeg-bytes");
    let empty = write_file(dir.path(), "empty.png", b"");
    let big = write_file(dir.path(), "big.gif", &[0u8; 64]);
    let reader = FsAvatarReader::with_limit(32);
    let mut avatar = AvatarState::default();

    block_on(avatar.upload(&reader, &good)).unwrap();
    let before = avatar.clone();

    let err = block_on(avatar.upload(&reader, &empty)).unwrap_err();
    assert!(matches!(err, AvatarError::Empty));
    let err = block_on(avatar.upload(&reader, &big)).unwrap_err();
    assert!(matches!(err, AvatarError::TooLarge { size: 64, limit: 32 }));
    let err = block_on(avatar.upload(&reader, &dir.path().join("absent.png"))).unwrap_err();
    assert!(matches!(err, AvatarError::Io(_)));

    assert_eq!(avatar, before);
}

#[test]
fn reader_rejects_non_images_before_touching_disk() {
    let err = block_on(FsAvatarReader::default().read_data_url(Path::new("/nope/notes.txt")))
        .unwrap_err();
    assert!(matches!(err, AvatarError::UnsupportedType(_)));
}
