use exgen::generator::generate_all;
use exgen::model::{load_model, model_from_yaml};
use std::fs;

const FIXTURE: &str = r#"
modules:
  - name: DbProtocol
    attrs:
      db.app: Acme
    records:
      - name: User
        annotation: A registered user
        attrs:
          db.entity: Schema.UserEntity
          db.preload: contact
        fields:
          - name: name
          - name: email
            default: '""'
            attrs:
              db.take: contact?.email
      - name: Internal
        fields:
          - name: counter
    services:
      - name: user_service
        server_enabled: true
        resources:
          - name: get_user
            method: GET
            path:
              - lit: users
              - var: user_id
            request_vars:
              - name: user_id
                ty: integer
            responses:
              - content:
                  ty: DbProtocol.User.t()
            session: generic
            attrs:
              http.hint: read
          - name: delete_user
            method: DELETE
            path:
              - lit: users
              - var: user_id
            request_vars:
              - name: user_id
                ty: integer
            responses:
              - content:
                  ty: DataProtocol.GenericResponse.t()
            session: generic
            attrs:
              http.hint: delete
              http.if: admin?
"#;

#[test]
fn test_end_to_end_generation() {
    let model = model_from_yaml(FIXTURE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let written = generate_all(&model, dir.path(), false, None).unwrap();
    assert_eq!(written.len(), 3);

    let impl_text = fs::read_to_string(dir.path().join("db_protocol_impl.ex")).unwrap();
    assert!(impl_text.starts_with("defmodule DbProtocol.Impl do"));
    assert!(impl_text.contains("alias Acme.{Repo}"));
    assert!(impl_text.contains("# A registered user"));
    assert!(impl_text.contains("def to_user([]), do: []"));
    assert!(impl_text.contains("|> Repo.preload([:contact])"));
    assert!(impl_text.contains("name: rec.name,"));
    assert!(impl_text.contains("email: (rec.contact && rec.contact.email) || \"\""));
    // record without db.entity produces nothing
    assert!(!impl_text.contains("to_internal"));

    let stub_text = fs::read_to_string(
        dir.path()
            .join("db_protocol_user_service_get_user_handler.ex.example"),
    )
    .unwrap();
    assert!(stub_text.contains("@behaviour DbProtocol.UserService"));
    // route table lands only in the first resource's file, deduplicated
    // (both resources share the /users/:user_id shape)
    assert!(stub_text.contains("def router() do"));
    assert_eq!(stub_text.matches("match \"/users/:user_id\"").count(), 1);
    assert!(stub_text.contains("item = User.get_user!(user_id)"));

    let delete_text = fs::read_to_string(
        dir.path()
            .join("db_protocol_user_service_delete_user_handler.ex.example"),
    )
    .unwrap();
    assert!(!delete_text.contains("def router()"));
    assert!(delete_text.contains("unless admin?(session), do: raise DataProtocol.ForbiddenError"));
    let fetch = delete_text.find("item = User.get_user!(user_id)").unwrap();
    let delete = delete_text.find(":ok = User.delete_user!(user_id)").unwrap();
    assert!(fetch < delete);
    assert!(delete_text.contains("%DataProtocol.GenericResponse{result: true}"));
}

#[test]
fn test_existing_files_skipped_unless_forced() {
    let model = model_from_yaml(FIXTURE).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let first = generate_all(&model, dir.path(), false, None).unwrap();
    assert_eq!(first.len(), 3);

    let path = dir.path().join("db_protocol_impl.ex");
    fs::write(&path, "edited by hand\n").unwrap();

    let second = generate_all(&model, dir.path(), false, None).unwrap();
    assert!(second.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "edited by hand\n");

    let forced = generate_all(&model, dir.path(), true, None).unwrap();
    assert_eq!(forced.len(), 3);
    assert!(fs::read_to_string(&path)
        .unwrap()
        .starts_with("defmodule DbProtocol.Impl do"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let model = model_from_yaml(FIXTURE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let written = generate_all(&model, dir.path(), false, None).unwrap();
    let snapshot: Vec<(std::path::PathBuf, String)> = written
        .iter()
        .map(|p| (p.clone(), fs::read_to_string(p).unwrap()))
        .collect();

    generate_all(&model, dir.path(), true, None).unwrap();
    for (path, before) in snapshot {
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}

#[test]
fn test_load_model_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = dir.path().join("model.yaml");
    fs::write(&yaml_path, FIXTURE).unwrap();
    let model = load_model(&yaml_path).unwrap();
    assert_eq!(model.modules.len(), 1);
    assert_eq!(model.modules[0].records.len(), 2);
    assert_eq!(model.modules[0].services[0].resources.len(), 2);

    // the same document as JSON loads identically
    let json_path = dir.path().join("model.json");
    let value: serde_json::Value = serde_yaml::from_str(FIXTURE).unwrap();
    fs::write(&json_path, serde_json::to_string(&value).unwrap()).unwrap();
    let from_json = load_model(&json_path).unwrap();
    assert_eq!(from_json.modules[0].name, model.modules[0].name);
}

#[test]
fn test_module_filter_limits_entity_mappings() {
    let model = model_from_yaml(FIXTURE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let written = generate_all(&model, dir.path(), false, Some("SomethingElse")).unwrap();
    // handler stubs still generate; only the mapping module is filtered
    assert_eq!(written.len(), 2);
    assert!(!dir.path().join("db_protocol_impl.ex").exists());
}
