use crate::{
    context::Context,
    diagnostics::{ErrorCategory, ErrorKind, JsonError},
    json::{FieldReader, expect_object, parse_document},
    validation::Comparator,
};

/// Overrides the reporter's catalog with `data/errors.json`.
///
/// The root is an object with one array per category (`"IO"`, `"JSON"`,
/// `"Shader"`, keys matched case-insensitively), whose elements are
/// `{id, name, message}`. A missing name or message keeps the built-in one.
pub fn read_errors(ctx: &mut Context) {
    let path = ctx.config.data_file("errors.json");
    let Some(doc) = parse_document(&path, ctx.reporter) else {
        return;
    };
    let display = path.display().to_string();
    let Some(root) = expect_object(&doc, &display, ctx.reporter) else {
        return;
    };

    let mut loaded = 0;
    for (key, entries) in root {
        let Some(category) = ErrorCategory::from_key(key) else {
            log::warn!("Unknown error category \"{}\" in {}", key, display);
            continue;
        };
        let Some(entries) = entries.as_array() else {
            ctx.reporter.report(
                JsonError::WrongType,
                Some(&display),
                "The category will be skipped",
                &["errors", key, "Array"],
            );
            continue;
        };

        let count = ErrorKind::all().filter(|kind| kind.category() == category).count();
        let ids = Comparator::InRangeInclusive(0, count as i64 - 1);
        for (index, element) in entries.iter().enumerate() {
            let mut reader = FieldReader::new(ctx.reporter, &path, category.key());
            let Some(object) = reader.object(index, element) else {
                continue;
            };
            let id = reader.int(object, index, "id", &ids, -1);
            let Some(kind) = u32::try_from(id)
                .ok()
                .and_then(|id| ErrorKind::from_id(category, id))
            else {
                continue;
            };
            let builtin = reader.reporter().catalog().get(kind).clone();
            let any = Comparator::Always;
            let name = reader
                .optional_string(object, index, "name", &any, &builtin.name)
                .unwrap_or(builtin.name);
            let message = reader
                .optional_string(object, index, "message", &any, &builtin.message)
                .unwrap_or(builtin.message);
            reader.reporter().catalog_mut().insert(kind, &name, &message);
            loaded += 1;
        }
    }
    log::info!("Loaded {} error messages", loaded);
}
