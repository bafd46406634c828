use std::collections::HashSet;

/// Expand glob patterns in the input arguments into concrete file paths.
///
/// Shells on some platforms pass `*.lproj/Localizable.strings` through
/// verbatim, so patterns are expanded here. Literal paths are kept as given,
/// and a pattern that matches nothing is kept too so the missing file is
/// reported by the conversion itself.
pub fn expand_input_globs(inputs: &[String]) -> Result<Vec<String>, String> {
    fn has_glob_meta(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<String> = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !has_glob_meta(input) {
            if seen.insert(input.clone()) {
                results.push(input.clone());
            }
            continue;
        }

        let paths =
            glob::glob(input).map_err(|e| format!("Invalid glob pattern '{}': {}", input, e))?;
        let mut matched: Vec<String> = paths
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .map(|path| path.to_string_lossy().to_string())
            .collect();
        matched.sort();

        if matched.is_empty() {
            matched.push(input.clone());
        }
        for path in matched {
            if seen.insert(path.clone()) {
                results.push(path);
            }
        }
    }

    Ok(results)
}
