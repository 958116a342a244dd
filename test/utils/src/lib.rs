pub fn snippet_fixture() -> &'static str {
    return r#"
def two_sum(nums, target):
    for i in range(len(nums)):
        for j in range(len(nums)):
            if nums[i] + nums[j] == target:
                return [i, j]

    return []
"#
    .trim();
}

pub fn context_json_fixture(request_id: &str) -> String {
    return format!(
        r#"{{"type":"context","request":"{request_id}","problem_id":"two-sum","snippet":"def two_sum(nums, target):","url":"https://practice.dev/problems/two-sum/","failure":"Wrong Answer on case 3"}}"#
    );
}
