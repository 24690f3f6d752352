/// Up to two uppercase initials, used when a contact has no photo.
pub fn initials(name: &str) -> String {
    let initials = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect::<String>();

    if initials.is_empty() {
        "?".to_owned()
    } else {
        initials
    }
}

pub fn contact_count_label(count: usize) -> String {
    if count == 1 {
        "1 contact".to_owned()
    } else {
        format!("{count} contacts")
    }
}
