use crate::model::{ConfigModel, Subnet};

/// Render the parsed model as an indented tree, cut off below `max_depth`.
pub fn render_model(model: &ConfigModel, max_depth: usize) -> String {
    let mut tree = Tree {
        out: String::new(),
        max_depth,
    };

    tree.push(0, "globals");
    for (key, value) in &model.globals {
        tree.push(1, &format!("{key} = {value}"));
    }

    tree.push(0, "option-spaces");
    for space in &model.option_spaces {
        tree.push(1, space);
    }

    tree.push(0, "option-definitions");
    for def in &model.option_definitions {
        tree.push(
            1,
            &format!("{}.{} code={} type={}", def.space, def.name, def.code, def.kind),
        );
    }

    tree.push(0, "classes");
    for (name, body) in &model.classes {
        tree.push(1, &format!("{name} lines={}", body.lines().count()));
    }

    tree.push(0, "shared-networks");
    for network in &model.shared_networks {
        tree.push(1, network);
        for subnet in model.subnets_of(network) {
            render_subnet(&mut tree, subnet);
        }
    }

    tree.out
}

fn render_subnet(tree: &mut Tree, subnet: &Subnet) {
    tree.push(
        2,
        &format!(
            "subnet {} netmask {} line={}",
            subnet.address, subnet.netmask, subnet.line
        ),
    );
    for range in &subnet.ranges {
        tree.push(3, &format!("range {} {}", range.start, range.end));
    }
    for (name, value) in subnet.options.iter() {
        tree.push(3, &format!("option {name} = {value}"));
    }
    for host in &subnet.hosts {
        tree.push(
            3,
            &format!(
                "host {} fixed-address={} hardware-ethernet={}",
                host.name, host.fixed_address, host.hardware_ethernet
            ),
        );
    }
}

struct Tree {
    out: String,
    max_depth: usize,
}

impl Tree {
    fn push(&mut self, depth: usize, text: &str) {
        if depth > self.max_depth {
            return;
        }
        self.out.push_str(&"  ".repeat(depth));
        self.out.push_str(text);
        self.out.push('\n');
    }
}
