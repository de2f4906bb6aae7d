const PINNED_COMPONENT: &str = "kubernetes";

/// `kubernetes=v<version>+vmware.<patch>`
pub(crate) fn kubernetes_pin(vmware_version: &str) -> String {
    format!("{PINNED_COMPONENT}=v{vmware_version}")
}

/// Replace every line mentioning `kubernetes` with `pin`, keeping line
/// endings. All other lines are copied unchanged.
pub(crate) fn rewrite_manifest(source: &str, pin: &str) -> String {
    let mut rewritten = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        if body.contains(PINNED_COMPONENT) {
            rewritten.push_str(pin);
            rewritten.push_str(ending);
        } else {
            rewritten.push_str(line);
        }
    }
    rewritten
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        return (body, "\r\n");
    }
    if let Some(body) = line.strip_suffix('\n') {
        return (body, "\n");
    }
    (line, "")
}
