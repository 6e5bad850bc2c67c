//! # Annotation Scanner
//!
//! Two passes over a Go file's struct declarations:
//!
//! 1. Skip-list fields, then `@inject_tag` directives on each field, while
//!    collecting pending `@inject_tag_oneof` resolutions keyed by the name of
//!    the generated wrapper type.
//! 2. Every wrapper named in that map gets a region on its first field.

use crate::error::AppResult;
use crate::observer::{InjectObserver, TracingObserver};
use crate::parser::directives::{
    is_skip_field, mangled_name, parse_directive, skip_metadata, title_case, Directive,
};
use crate::parser::models::{EditRegion, OneofResolution, RegionKind, RegionList};
use crate::parser::syntax::{doc_comments, field_name, parse_go, raw_tag, struct_specs};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tree_sitter::Node;

/// Scans a file on disk, logging through `tracing`.
pub fn scan_file(path: &Path, skip: &[String]) -> AppResult<RegionList> {
    scan_file_with(path, skip, &TracingObserver)
}

/// Scans a file on disk, reporting progress to `observer`.
pub fn scan_file_with(
    path: &Path,
    skip: &[String],
    observer: &dyn InjectObserver,
) -> AppResult<RegionList> {
    observer.on_scan_started(path);
    let source = fs::read(path)?;
    let regions = scan_source(&source, skip)?;
    for region in &regions {
        observer.on_region_found(path, region);
    }
    observer.on_scan_finished(path, regions.len());
    Ok(regions)
}

/// Plans every tag edit for in-memory Go source.
pub fn scan_source(source: &[u8], skip: &[String]) -> AppResult<RegionList> {
    let tree = parse_go(source)?;
    let specs = struct_specs(&tree);

    let skip_tag = skip_metadata(skip);
    let mut emitted = Vec::new();
    let mut oneofs: HashMap<String, OneofResolution> = HashMap::new();

    for spec in &specs {
        let Some(type_name) = spec.name(source) else {
            continue;
        };

        for field in spec.field_declarations() {
            if let Some(name) = field_name(field, source) {
                if is_skip_field(name, skip) {
                    if let Some(region) = field_region(field, source, &skip_tag, RegionKind::SkipList)
                    {
                        emitted.push(region);
                    }
                }
            }

            let docs = doc_comments(field, source);
            if docs.is_empty() {
                continue;
            }

            let directives: Vec<Directive> =
                docs.iter().filter_map(|line| parse_directive(line)).collect();

            let alternatives: Vec<&str> = directives
                .iter()
                .filter_map(|d| match d {
                    Directive::Alternative { type_name } => Some(type_name.as_str()),
                    _ => None,
                })
                .collect();

            for directive in &directives {
                match directive {
                    Directive::Inject { replacement } => {
                        if let Some(region) =
                            field_region(field, source, replacement, RegionKind::Direct)
                        {
                            emitted.push(region);
                        }
                    }
                    Directive::InjectOneof {
                        var_name,
                        replacement,
                    } => {
                        let alternative_name = title_case(var_name);
                        let mangled = mangled_name(type_name, &alternative_name);
                        match alternatives.iter().find(|alt| alt.contains(&mangled)) {
                            Some(target) => {
                                oneofs.insert(
                                    target.to_string(),
                                    OneofResolution {
                                        alternative_name,
                                        metadata: replacement.clone(),
                                    },
                                );
                            }
                            None => tracing::debug!(
                                mangled = %mangled,
                                "no oneof alternative matches directive"
                            ),
                        }
                    }
                    Directive::Alternative { .. } => {}
                }
            }
        }
    }

    if !oneofs.is_empty() {
        for spec in &specs {
            let Some(resolution) = spec.name(source).and_then(|name| oneofs.get(name)) else {
                continue;
            };
            let Some(payload) = spec.field_declarations().into_iter().next() else {
                continue;
            };
            if let Some(region) =
                field_region(payload, source, &resolution.metadata, RegionKind::Oneof)
            {
                emitted.push(region);
            }
        }
    }

    Ok(RegionList::from_emitted(emitted))
}

/// Builds a region over a field declaration, or `None` if it has no raw tag to replace.
fn field_region(
    field: Node<'_>,
    source: &[u8],
    replacement: &str,
    kind: RegionKind,
) -> Option<EditRegion> {
    let Some(current) = raw_tag(field, source) else {
        let pos = field.start_position();
        tracing::debug!(
            line = pos.row + 1,
            "field has no raw string tag, nothing to replace"
        );
        return None;
    };

    Some(EditRegion {
        start: field.start_byte(),
        end: field.end_byte(),
        current_metadata: current.to_string(),
        replacement_metadata: replacement.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pretty_assertions::assert_eq;

    fn scan(code: &str) -> Vec<EditRegion> {
        scan_source(code.as_bytes(), &[]).unwrap().as_slice().to_vec()
    }

    fn span<'a>(code: &'a str, region: &EditRegion) -> &'a str {
        &code[region.span()]
    }

    #[test]
    fn test_direct_directive() {
        let code = r#"package pb

type User struct {
	// @inject_tag: validate:"required"
	Name string `json:"name"`
	Age int `json:"age"`
}
"#;
        let regions = scan(code);
        assert_eq!(regions.len(), 1);
        assert_eq!(span(code, &regions[0]), "Name string `json:\"name\"`");
        assert_eq!(regions[0].current_metadata, r#"json:"name""#);
        assert_eq!(regions[0].replacement_metadata, r#"validate:"required""#);
        assert_eq!(regions[0].kind, RegionKind::Direct);
    }

    #[test]
    fn test_no_directives_no_regions() {
        let code = r#"package pb

type User struct {
	// Name of the user.
	Name string `json:"name"`
}

type Empty struct{}
"#;
        assert!(scan(code).is_empty());
    }

    #[test]
    fn test_malformed_directive_is_inert() {
        let code = r#"package pb

type User struct {
	// @inject_tag : missing colon spacing
	Name string `json:"name"`
}
"#;
        assert!(scan(code).is_empty());
    }

    #[test]
    fn test_untagged_field_is_skipped() {
        let code = r#"package pb

type User struct {
	// @inject_tag: json:"name"
	Name string
}
"#;
        assert!(scan(code).is_empty());
    }

    #[test]
    fn test_skip_list_requires_prefix_and_membership() {
        let code = r#"package pb

type User struct {
	Name string `json:"name"`
	XXX_unrecognized []byte `json:"-"`
	XXX_sizecache int32 `json:"-"`
}
"#;
        let skip = vec!["XXX_unrecognized".to_string(), "Name".to_string()];
        let list = scan_source(code.as_bytes(), &skip).unwrap();
        let regions = list.as_slice();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::SkipList);
        assert!(span(code, &regions[0]).starts_with("XXX_unrecognized"));
        assert_eq!(regions[0].current_metadata, r#"json:"-""#);
        assert_eq!(
            regions[0].replacement_metadata,
            r#"XXX_unrecognized:"-",Name:"-""#
        );
    }

    #[test]
    fn test_oneof_resolution() {
        let code = r#"package pb

type Msg struct {
	// Types that are valid to be assigned to Payload:
	//	*Msg_Foo
	//	*Msg_Bar
	// @inject_tag_oneof: foo: json:"foo"
	Payload isMsg_Payload `protobuf_oneof:"payload"`
}

type isMsg_Payload interface {
	isMsg_Payload()
}

type Msg_Foo struct {
	Foo string `protobuf:"bytes,1,opt,name=foo,proto3,oneof"`
}

type Msg_Bar struct {
	Bar string `protobuf:"bytes,2,opt,name=bar,proto3,oneof"`
}
"#;
        let regions = scan(code);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Oneof);
        assert!(span(code, &regions[0]).starts_with("Foo string"));
        assert_eq!(regions[0].replacement_metadata, r#"json:"foo""#);
    }

    #[test]
    fn test_oneof_first_alternative_wins() {
        let code = r#"package pb

type Msg struct {
	//	*Msg_Foo
	//	*Msg_FooBar
	// @inject_tag_oneof: foo: json:"foo"
	Payload isMsg_Payload `protobuf_oneof:"payload"`
}

type Msg_FooBar struct {
	FooBar string `json:"a"`
}

type Msg_Foo struct {
	Foo string `json:"b"`
}
"#;
        let regions = scan(code);
        assert_eq!(regions.len(), 1);
        assert!(span(code, &regions[0]).starts_with("Foo string"));
    }

    #[test]
    fn test_oneof_without_matching_alternative() {
        let code = r#"package pb

type Msg struct {
	//	*Other_Foo
	// @inject_tag_oneof: foo: json:"foo"
	Payload isMsg_Payload `protobuf_oneof:"payload"`
}

type Other_Foo struct {
	Foo string `json:"b"`
}
"#;
        assert!(scan(code).is_empty());
    }

    #[test]
    fn test_direct_directive_wins_over_skip_list() {
        let code = r#"package pb

type User struct {
	// @inject_tag: json:"extra"
	XXX_extra string `json:"-"`
}
"#;
        let skip = vec!["XXX_extra".to_string()];
        let list = scan_source(code.as_bytes(), &skip).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].kind, RegionKind::Direct);
        assert_eq!(list.as_slice()[0].replacement_metadata, r#"json:"extra""#);
    }

    #[test]
    fn test_regions_sorted_across_passes() {
        let code = r#"package pb

type Msg_Foo struct {
	Foo string `json:"foo"`
}

type Msg struct {
	//	*Msg_Foo
	// @inject_tag_oneof: foo: json:"injected"
	Payload isMsg_Payload `protobuf_oneof:"payload"`
	// @inject_tag: json:"id,omitempty"
	Id int64 `json:"id"`
}
"#;
        let regions = scan(code);
        assert_eq!(regions.len(), 2);
        assert!(regions[0].start < regions[1].start);
        assert_eq!(regions[0].kind, RegionKind::Oneof);
        assert_eq!(regions[1].kind, RegionKind::Direct);
    }

    #[test]
    fn test_parse_error() {
        let res = scan_source(b"package pb\n\ntype User struct {\n", &[]);
        assert!(matches!(res, Err(AppError::Parse(_))));
    }
}
